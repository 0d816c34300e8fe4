//! Item Store - The in-memory snapshot of the non-archived catalogue.
//!
//! The catalogue is always read as a whole: every successful mutation is
//! followed by a full [`Catalog::refresh`], and the previous snapshot is kept
//! untouched when a refresh fails (stale but consistent). Category and
//! subcategory names are joined onto each item exactly once here, so
//! downstream code only ever sees one normalized item shape; the id fields
//! remain the source of truth for editing.

use crate::{
    entities::{Category, Item, item},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// A catalogue item in its single normalized shape.
///
/// Display names are denormalized at the store boundary; an uncategorized item
/// carries empty strings, never a missing field.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Unique item id
    pub id: i64,
    /// Item name
    pub name: String,
    /// Notes, empty string when the item has none
    pub notes: String,
    /// Top-level category id, if categorized
    pub category_id: Option<i64>,
    /// Subcategory id, if set
    pub subcategory_id: Option<i64>,
    /// Display name of the category, empty string when uncategorized
    pub category: String,
    /// Display name of the subcategory, empty string when unset
    pub subcategory: String,
    /// Whether the item is on the shopping list
    pub on_list: bool,
    /// Whether the item is in the cart
    pub in_cart: bool,
    /// When the item was last checked out
    pub last_purchased: Option<chrono::NaiveDateTime>,
    /// Repurchase cadence in days, when configured
    pub purchase_interval_days: Option<i32>,
}

/// Snapshot of all non-archived items, ordered by name as the store returns
/// them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// The normalized items, in store order
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Fetches a fresh snapshot of the catalogue from the store.
    ///
    /// Items are filtered to `is_archived = false` and ordered ascending by
    /// name. On failure the error is propagated and the caller's existing
    /// snapshot stays as-is; no retry is attempted.
    ///
    /// # Errors
    /// Returns an error if either store query fails.
    pub async fn refresh(db: &DatabaseConnection) -> Result<Self> {
        let items = Item::find()
            .filter(item::Column::IsArchived.eq(false))
            .order_by_asc(item::Column::Name)
            .all(db)
            .await?;

        let names: HashMap<i64, String> = Category::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let resolve = |id: Option<i64>| -> String {
            id.and_then(|id| names.get(&id).cloned()).unwrap_or_default()
        };

        let items = items
            .into_iter()
            .map(|i| CatalogItem {
                id: i.id,
                name: i.name,
                notes: i.notes.unwrap_or_default(),
                category: resolve(i.category_id),
                subcategory: resolve(i.subcategory_id),
                category_id: i.category_id,
                subcategory_id: i.subcategory_id,
                on_list: i.on_list,
                in_cart: i.in_cart,
                last_purchased: i.last_purchased,
                purchase_interval_days: i.purchase_interval_days,
            })
            .collect();

        Ok(Self { items })
    }

    /// Looks up a snapshot item by name (exact match).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.name == name)
    }
}
