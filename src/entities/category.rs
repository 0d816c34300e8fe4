//! Category entity - Represents the two-level category hierarchy.
//!
//! Top-level categories have a null `parent_id`; subcategories reference their
//! parent's id. The hierarchy is exactly two levels deep - subcategories never
//! have children of their own. Rows are seeded from config.toml at startup and
//! treated as read-only afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Dairy", "Produce")
    pub name: String,
    /// Parent category id; None for top-level categories
    pub parent_id: Option<i64>,
    /// Display colour hint for rendering badges (e.g., "stone")
    pub colors: Option<String>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category is referenced by many items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
