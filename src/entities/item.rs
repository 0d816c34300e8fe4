//! Item entity - Represents a purchasable item in the catalogue.
//!
//! Each item carries optional category/subcategory tags, free-form notes, and
//! an optional repurchase cadence in days. The `on_list`/`in_cart` flags drive
//! the shopping-list and cart views; `in_cart` is only ever true while
//! `on_list` is true. Archived items are hidden from every view but kept in
//! the store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the item (e.g., "Milk", "Paper Towels")
    pub name: String,
    /// Free-form notes shown alongside the item
    pub notes: Option<String>,
    /// Top-level category id, if the item is categorized
    pub category_id: Option<i64>,
    /// Subcategory id; must be a child of `category_id` when present
    pub subcategory_id: Option<i64>,
    /// Whether the item is currently on the shopping list
    pub on_list: bool,
    /// Whether the item is in the cart (implies `on_list`)
    pub in_cart: bool,
    /// When the item was last checked out of the cart
    pub last_purchased: Option<DateTime>,
    /// Expected repurchase cadence in days; positive when present
    pub purchase_interval_days: Option<i32>,
    /// Archive flag - archived items are excluded from every view
    pub is_archived: bool,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item may belong to one top-level category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Each item may belong to one subcategory
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::SubcategoryId",
        to = "super::category::Column::Id"
    )]
    Subcategory,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
