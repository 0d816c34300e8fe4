//! Category hierarchy configuration loading from config.toml
//!
//! The category tree is defined declaratively in config.toml and seeded into
//! the store on startup (see `core::category::seed_categories`). Each entry
//! names a top-level category, an optional display colour, and its
//! subcategories.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CategoryFile {
    /// List of top-level category configurations to seed
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single top-level category and its children
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Name of the category
    pub name: String,
    /// Display colour hint for rendering (e.g., "amber")
    #[serde(default)]
    pub colors: Option<String>,
    /// Names of the subcategories under this category
    #[serde(default)]
    pub subcategories: Vec<String>,
}

/// Loads the category configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CategoryFile> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the category configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<CategoryFile> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_category_config() {
        let toml_str = r#"
            [[categories]]
            name = "Dairy"
            colors = "amber"
            subcategories = ["Cheese", "Milk & Cream", "Yogurt"]

            [[categories]]
            name = "Household"
        "#;

        let config: CategoryFile = toml::from_str(toml_str).unwrap();
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "Dairy");
        assert_eq!(config.categories[0].colors.as_deref(), Some("amber"));
        assert_eq!(config.categories[0].subcategories.len(), 3);

        assert_eq!(config.categories[1].name, "Household");
        assert!(config.categories[1].colors.is_none());
        assert!(config.categories[1].subcategories.is_empty());
    }
}
