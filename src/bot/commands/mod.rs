//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Item catalogue management commands
pub mod item;

/// Shopping list and cart commands
pub mod list;

// Export commands
pub use general::*;
pub use item::*;
pub use list::*;
