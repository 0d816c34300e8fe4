//! Shared test utilities for `GroceryBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::item::{self, ItemDraft},
    entities::{self, Item, item as item_entity},
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a category row directly, for building test hierarchies.
///
/// Pass `parent_id: None` for a top-level category, or the parent's id for a
/// subcategory.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
    parent_id: Option<i64>,
) -> Result<entities::category::Model> {
    use sea_orm::Set;

    let category = entities::category::ActiveModel {
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        colors: Set(None),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Creates an uncategorized test item, off the list and without an interval.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::item::Model> {
    item::create_item(
        db,
        ItemDraft {
            name: name.to_string(),
            ..Default::default()
        },
        false,
    )
    .await
}

/// Creates a test item with custom category tags and purchase interval.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    name: &str,
    category_id: Option<i64>,
    subcategory_id: Option<i64>,
    purchase_interval_days: Option<i32>,
) -> Result<entities::item::Model> {
    item::create_item(
        db,
        ItemDraft {
            name: name.to_string(),
            notes: None,
            category_id,
            subcategory_id,
            purchase_interval_days,
        },
        false,
    )
    .await
}

/// Asserts the cart/list invariant over the whole store: no row may be in the
/// cart without also being on the list.
pub async fn assert_cart_implies_list(db: &DatabaseConnection) -> Result<()> {
    let offenders = Item::find()
        .filter(item_entity::Column::InCart.eq(true))
        .filter(item_entity::Column::OnList.eq(false))
        .all(db)
        .await?;
    assert!(
        offenders.is_empty(),
        "items in cart but not on list: {offenders:?}"
    );
    Ok(())
}
