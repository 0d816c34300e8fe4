//! Core business logic - framework-agnostic catalogue, list, and cart
//! operations.
//!
//! Control flow is always mutate, refresh, derive: the bot layer writes
//! through [`item`], pulls a fresh [`catalog::Catalog`] snapshot, and computes
//! its display collections with the pure functions in [`views`].

/// Item store snapshot and the normalized item shape
pub mod catalog;
/// Category hierarchy loading, resolution, and seeding
pub mod category;
/// Item mutation operations (create, update, delete, list/cart moves)
pub mod item;
/// Pure derivation engine: partitions, suggestions, search, interval codec
pub mod views;
