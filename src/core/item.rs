//! Item mutation operations - create, update, delete, and list/cart moves.
//!
//! All writers against the `items` table live here. Every function performs
//! its own input validation before touching the store, and callers refresh the
//! catalogue snapshot after any successful mutation - there is no optimistic
//! local patching. `clear_cart` is the only writer of `last_purchased`, which
//! is the baseline the suggestion engine computes against.

use crate::{
    entities::{Category, Item, item},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{Set, sea_query::Expr, prelude::*};

/// Caller-supplied catalogue fields for creating or updating an item.
///
/// List and cart flags are deliberately absent: `on_list` is set explicitly on
/// creation and through [`set_list_membership`] afterwards, and `in_cart` only
/// moves through [`toggle_cart`] and [`clear_cart`].
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    /// Item name; trimmed and required to be non-empty
    pub name: String,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Optional top-level category id
    pub category_id: Option<i64>,
    /// Optional subcategory id; must be a child of `category_id`
    pub subcategory_id: Option<i64>,
    /// Optional repurchase cadence in days; must be positive when present
    pub purchase_interval_days: Option<i32>,
}

/// Validates a draft against the store before any write is attempted.
async fn validate_draft(db: &DatabaseConnection, draft: &ItemDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }

    if let Some(days) = draft.purchase_interval_days
        && days <= 0
    {
        return Err(Error::InvalidInterval {
            days: i64::from(days),
        });
    }

    if let Some(sub_id) = draft.subcategory_id {
        let Some(category_id) = draft.category_id else {
            return Err(Error::Config {
                message: "Subcategory requires a category".to_string(),
            });
        };

        let sub = Category::find_by_id(sub_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::CategoryNotFound {
                name: sub_id.to_string(),
            })?;

        if sub.parent_id != Some(category_id) {
            return Err(Error::Config {
                message: format!(
                    "Subcategory '{}' does not belong to the selected category",
                    sub.name
                ),
            });
        }
    }

    Ok(())
}

/// Retrieves a non-archived item by its unique id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item_by_id(db: &DatabaseConnection, item_id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(item_id)
        .filter(item::Column::IsArchived.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a non-archived item by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<item::Model>> {
    Item::find()
        .filter(item::Column::Name.eq(name))
        .filter(item::Column::IsArchived.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new catalogue item.
///
/// The item starts unarchived and out of the cart; whether it goes straight
/// onto the shopping list is the caller's choice via `on_list`.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The purchase interval is zero or negative
/// - The subcategory is not a child of the selected category
/// - The database insert operation fails
pub async fn create_item(
    db: &DatabaseConnection,
    draft: ItemDraft,
    on_list: bool,
) -> Result<item::Model> {
    validate_draft(db, &draft).await?;

    let now = chrono::Utc::now().naive_utc();

    let item = item::ActiveModel {
        name: Set(draft.name.trim().to_string()),
        notes: Set(draft.notes),
        category_id: Set(draft.category_id),
        subcategory_id: Set(draft.subcategory_id),
        on_list: Set(on_list),
        in_cart: Set(false),
        last_purchased: Set(None),
        purchase_interval_days: Set(draft.purchase_interval_days),
        is_archived: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    item.insert(db).await.map_err(Into::into)
}

/// Updates an item's catalogue fields to the complete state in `draft`.
///
/// This is a full-field update of the form-editable fields; list and cart
/// flags are left untouched. Partial-field merging is the form layer's job.
///
/// # Errors
/// Returns an error if:
/// - The draft fails validation (see [`create_item`])
/// - The item does not exist or is archived
/// - The database update operation fails
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    draft: ItemDraft,
) -> Result<item::Model> {
    validate_draft(db, &draft).await?;

    let mut item: item::ActiveModel = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: item_id.to_string(),
        })?
        .into();

    item.name = Set(draft.name.trim().to_string());
    item.notes = Set(draft.notes);
    item.category_id = Set(draft.category_id);
    item.subcategory_id = Set(draft.subcategory_id);
    item.purchase_interval_days = Set(draft.purchase_interval_days);
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    item.update(db).await.map_err(Into::into)
}

/// Permanently deletes an item from the store.
///
/// There is no archive-then-purge step: the row is gone once this returns.
/// Confirmation is the UI layer's responsibility.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no row matches, or a database error if
/// the delete fails.
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = Item::delete_by_id(item_id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(Error::ItemNotFound {
            name: item_id.to_string(),
        });
    }
    Ok(())
}

/// Archives an item, hiding it from every view while keeping its history.
///
/// # Errors
/// Returns an error if the item does not exist (or is already archived), or
/// the database update fails.
pub async fn archive_item(db: &DatabaseConnection, item_id: i64) -> Result<item::Model> {
    let mut item: item::ActiveModel = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: item_id.to_string(),
        })?
        .into();

    // Dropping off every view includes the list and cart
    item.is_archived = Set(true);
    item.on_list = Set(false);
    item.in_cart = Set(false);
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    item.update(db).await.map_err(Into::into)
}

/// Puts an item on the shopping list or takes it off.
///
/// Removing an item from the list also removes it from the cart, so an item
/// can never be in the cart without being on the list.
///
/// # Errors
/// Returns an error if the item does not exist or the database update fails.
pub async fn set_list_membership(
    db: &DatabaseConnection,
    item_id: i64,
    on_list: bool,
) -> Result<item::Model> {
    let mut item: item::ActiveModel = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: item_id.to_string(),
        })?
        .into();

    item.on_list = Set(on_list);
    if !on_list {
        item.in_cart = Set(false);
    }
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    item.update(db).await.map_err(Into::into)
}

/// Flips an item's cart flag without touching its list membership.
///
/// An item that is not on the list cannot be put in the cart.
///
/// # Errors
/// Returns an error if the item does not exist, is off the list, or the
/// database update fails.
pub async fn toggle_cart(db: &DatabaseConnection, item_id: i64) -> Result<item::Model> {
    let model = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: item_id.to_string(),
        })?;

    if !model.on_list {
        return Err(Error::Config {
            message: format!("'{}' is not on the shopping list", model.name),
        });
    }

    let was_in_cart = model.in_cart;
    let mut item: item::ActiveModel = model.into();
    item.in_cart = Set(!was_in_cart);
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    item.update(db).await.map_err(Into::into)
}

/// Checks out the cart: every listed id still in the cart comes off both the
/// cart and the list, and its `last_purchased` baseline is stamped with `now`.
///
/// Only rows with `in_cart = true` are touched, which makes the operation
/// idempotent: a second run over the same ids matches nothing. Returns the
/// number of items checked out.
///
/// # Errors
/// Returns an error if the database update fails.
pub async fn clear_cart(
    db: &DatabaseConnection,
    item_ids: &[i64],
    now: NaiveDateTime,
) -> Result<u64> {
    if item_ids.is_empty() {
        return Ok(0);
    }

    let result = Item::update_many()
        .col_expr(item::Column::InCart, Expr::value(false))
        .col_expr(item::Column::OnList, Expr::value(false))
        .col_expr(item::Column::LastPurchased, Expr::value(Some(now)))
        .col_expr(item::Column::UpdatedAt, Expr::value(now))
        .filter(item::Column::Id.is_in(item_ids.iter().copied()))
        .filter(item::Column::InCart.eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_item(&db, ItemDraft::default(), false).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Config { message: _ }
        ));

        let result = create_item(
            &db,
            ItemDraft {
                name: "   ".to_string(),
                ..Default::default()
            },
            false,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_item(
            &db,
            ItemDraft {
                name: "Milk".to_string(),
                purchase_interval_days: Some(0),
                ..Default::default()
            },
            false,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidInterval { days: 0 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_item(
            &db,
            ItemDraft {
                name: "  Milk  ".to_string(),
                purchase_interval_days: Some(7),
                ..Default::default()
            },
            true,
        )
        .await?;

        assert_eq!(item.name, "Milk");
        assert!(item.on_list);
        assert!(!item.in_cart);
        assert!(!item.is_archived);
        assert!(item.last_purchased.is_none());
        assert_eq!(item.purchase_interval_days, Some(7));

        Ok(())
    }

    #[tokio::test]
    async fn test_subcategory_must_be_child_of_category() -> Result<()> {
        let db = setup_test_db().await?;

        let dairy = create_test_category(&db, "Dairy", None).await?;
        let produce = create_test_category(&db, "Produce", None).await?;
        let cheese = create_test_category(&db, "Cheese", Some(dairy.id)).await?;

        // Subcategory under the wrong parent
        let result = create_item(
            &db,
            ItemDraft {
                name: "Brie".to_string(),
                category_id: Some(produce.id),
                subcategory_id: Some(cheese.id),
                ..Default::default()
            },
            false,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Subcategory without any category
        let result = create_item(
            &db,
            ItemDraft {
                name: "Brie".to_string(),
                subcategory_id: Some(cheese.id),
                ..Default::default()
            },
            false,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Correct pairing succeeds
        let item = create_item(
            &db,
            ItemDraft {
                name: "Brie".to_string(),
                category_id: Some(dairy.id),
                subcategory_id: Some(cheese.id),
                ..Default::default()
            },
            false,
        )
        .await?;
        assert_eq!(item.subcategory_id, Some(cheese.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_full_field() -> Result<()> {
        let db = setup_test_db().await?;

        let dairy = create_test_category(&db, "Dairy", None).await?;
        let item = create_custom_item(&db, "Milk", Some(dairy.id), None, Some(7)).await?;
        set_list_membership(&db, item.id, true).await?;

        // A draft with no category clears the old tags; list state is untouched
        let updated = update_item(
            &db,
            item.id,
            ItemDraft {
                name: "Oat Milk".to_string(),
                notes: Some("the barista one".to_string()),
                purchase_interval_days: Some(14),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.name, "Oat Milk");
        assert_eq!(updated.notes.as_deref(), Some("the barista one"));
        assert_eq!(updated.category_id, None);
        assert_eq!(updated.purchase_interval_days, Some(14));
        assert!(updated.on_list);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_item(
            &db,
            999,
            ItemDraft {
                name: "Ghost".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { name: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_is_permanent() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "Milk").await?;
        delete_item(&db, item.id).await?;

        assert!(Item::find_by_id(item.id).one(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_nonexistent_leaves_store_intact() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "Milk").await?;

        let result = delete_item(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { name: _ }));

        // The snapshot is uncorrupted: the existing row is still there
        assert!(get_item_by_id(&db, item.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_archive_hides_item_from_lookups() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "Milk").await?;
        set_list_membership(&db, item.id, true).await?;
        toggle_cart(&db, item.id).await?;

        let archived = archive_item(&db, item.id).await?;
        assert!(archived.is_archived);
        assert!(!archived.on_list);
        assert!(!archived.in_cart);

        assert!(get_item_by_id(&db, item.id).await?.is_none());
        assert!(get_item_by_name(&db, "Milk").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_removing_from_list_removes_from_cart() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "Milk").await?;
        set_list_membership(&db, item.id, true).await?;
        let carted = toggle_cart(&db, item.id).await?;
        assert!(carted.in_cart);

        let off = set_list_membership(&db, item.id, false).await?;
        assert!(!off.on_list);
        assert!(!off.in_cart);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_cart_requires_list_membership() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "Milk").await?;

        let result = toggle_cart(&db, item.id).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        set_list_membership(&db, item.id, true).await?;
        let carted = toggle_cart(&db, item.id).await?;
        assert!(carted.in_cart);
        assert!(carted.on_list);

        let uncarted = toggle_cart(&db, item.id).await?;
        assert!(!uncarted.in_cart);
        assert!(uncarted.on_list);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_implies_list_after_every_operation() -> Result<()> {
        let db = setup_test_db().await?;

        let a = create_test_item(&db, "Milk").await?;
        let b = create_test_item(&db, "Eggs").await?;
        assert_cart_implies_list(&db).await?;

        set_list_membership(&db, a.id, true).await?;
        set_list_membership(&db, b.id, true).await?;
        assert_cart_implies_list(&db).await?;

        toggle_cart(&db, a.id).await?;
        assert_cart_implies_list(&db).await?;

        update_item(
            &db,
            a.id,
            ItemDraft {
                name: "Whole Milk".to_string(),
                ..Default::default()
            },
        )
        .await?;
        assert_cart_implies_list(&db).await?;

        set_list_membership(&db, a.id, false).await?;
        assert_cart_implies_list(&db).await?;

        toggle_cart(&db, b.id).await?;
        clear_cart(&db, &[a.id, b.id], chrono::Utc::now().naive_utc()).await?;
        assert_cart_implies_list(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_stamps_last_purchased() -> Result<()> {
        let db = setup_test_db().await?;

        let a = create_test_item(&db, "Milk").await?;
        let b = create_test_item(&db, "Eggs").await?;
        set_list_membership(&db, a.id, true).await?;
        set_list_membership(&db, b.id, true).await?;
        toggle_cart(&db, a.id).await?;
        // b stays on the list but out of the cart

        let now = chrono::Utc::now().naive_utc();
        let cleared = clear_cart(&db, &[a.id, b.id], now).await?;
        assert_eq!(cleared, 1);

        let a_after = get_item_by_id(&db, a.id).await?.unwrap();
        assert!(!a_after.on_list);
        assert!(!a_after.in_cart);
        assert_eq!(a_after.last_purchased, Some(now));

        // The un-carted item is untouched, including its purchase baseline
        let b_after = get_item_by_id(&db, b.id).await?.unwrap();
        assert!(b_after.on_list);
        assert!(b_after.last_purchased.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let a = create_test_item(&db, "Milk").await?;
        set_list_membership(&db, a.id, true).await?;
        toggle_cart(&db, a.id).await?;

        let now = chrono::Utc::now().naive_utc();
        assert_eq!(clear_cart(&db, &[a.id], now).await?, 1);

        let after_first = get_item_by_id(&db, a.id).await?.unwrap();

        // Second application matches nothing and changes nothing
        assert_eq!(clear_cart(&db, &[a.id], now).await?, 0);
        let after_second = get_item_by_id(&db, a.id).await?.unwrap();
        assert_eq!(after_first, after_second);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_empty_ids_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(clear_cart(&db, &[], chrono::Utc::now().naive_utc()).await?, 0);
        Ok(())
    }
}
