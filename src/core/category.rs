//! Category hierarchy - Loading and resolution of the two-level category tree.
//!
//! Categories are seeded from config.toml on startup and treated as read-only
//! afterwards, so the hierarchy is loaded once and the lookup helpers operate
//! over the loaded slice rather than hitting the store per query.

use crate::{
    config::categories::CategoryFile,
    entities::{Category, category},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Loads the full category hierarchy from the store, ordered by insertion.
///
/// Both top-level categories and subcategories are returned in one flat list;
/// use [`top_level`] and [`children_of`] to slice it.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn load_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the top-level categories (those without a parent).
#[must_use]
pub fn top_level(categories: &[category::Model]) -> Vec<&category::Model> {
    categories.iter().filter(|c| c.parent_id.is_none()).collect()
}

/// Returns the subcategories belonging to the given parent category.
#[must_use]
pub fn children_of(categories: &[category::Model], category_id: i64) -> Vec<&category::Model> {
    categories
        .iter()
        .filter(|c| c.parent_id == Some(category_id))
        .collect()
}

/// Finds a category by exact name, returning None if no category matches.
#[must_use]
pub fn resolve_by_name<'a>(
    categories: &'a [category::Model],
    name: &str,
) -> Option<&'a category::Model> {
    categories.iter().find(|c| c.name == name)
}

/// Seeds the category hierarchy from the parsed config file.
///
/// Inserts any configured category (and its subcategories) that is missing
/// from the store, matching by name for top-level rows and by (name, parent)
/// for subcategories. Existing rows are never updated or deleted, so the
/// operation is idempotent and safe to run on every startup.
///
/// # Errors
/// Returns an error if any store query or insert fails.
pub async fn seed_categories(db: &DatabaseConnection, config: &CategoryFile) -> Result<()> {
    let mut seeded = 0usize;

    for entry in &config.categories {
        let parent = match Category::find()
            .filter(category::Column::Name.eq(entry.name.as_str()))
            .filter(category::Column::ParentId.is_null())
            .one(db)
            .await?
        {
            Some(existing) => existing,
            None => {
                let parent = category::ActiveModel {
                    name: Set(entry.name.clone()),
                    parent_id: Set(None),
                    colors: Set(entry.colors.clone()),
                    ..Default::default()
                };
                seeded += 1;
                parent.insert(db).await?
            }
        };

        for sub_name in &entry.subcategories {
            let existing = Category::find()
                .filter(category::Column::Name.eq(sub_name.as_str()))
                .filter(category::Column::ParentId.eq(parent.id))
                .one(db)
                .await?;

            if existing.is_none() {
                let sub = category::ActiveModel {
                    name: Set(sub_name.clone()),
                    parent_id: Set(Some(parent.id)),
                    colors: Set(entry.colors.clone()),
                    ..Default::default()
                };
                sub.insert(db).await?;
                seeded += 1;
            }
        }
    }

    if seeded > 0 {
        info!("Seeded {seeded} missing categories from config");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_hierarchy_resolution() -> Result<()> {
        let db = setup_test_db().await?;

        let dairy = create_test_category(&db, "Dairy", None).await?;
        let produce = create_test_category(&db, "Produce", None).await?;
        let cheese = create_test_category(&db, "Cheese", Some(dairy.id)).await?;
        let yogurt = create_test_category(&db, "Yogurt", Some(dairy.id)).await?;

        let all = load_categories(&db).await?;
        assert_eq!(all.len(), 4);

        let tops = top_level(&all);
        assert_eq!(tops.len(), 2);
        assert_eq!(tops[0].name, "Dairy");
        assert_eq!(tops[1].name, "Produce");

        let dairy_children = children_of(&all, dairy.id);
        assert_eq!(dairy_children.len(), 2);
        assert_eq!(dairy_children[0].id, cheese.id);
        assert_eq!(dairy_children[1].id, yogurt.id);

        assert!(children_of(&all, produce.id).is_empty());

        assert_eq!(resolve_by_name(&all, "Produce").unwrap().id, produce.id);
        assert!(resolve_by_name(&all, "Frozen").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_load_categories_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_category(&db, "Zebra Snacks", None).await?;
        create_test_category(&db, "Apples", None).await?;

        // Insertion order, not alphabetical
        let all = load_categories(&db).await?;
        assert_eq!(all[0].name, "Zebra Snacks");
        assert_eq!(all[1].name, "Apples");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_categories_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let config: CategoryFile = toml::from_str(
            r#"
            [[categories]]
            name = "Dairy"
            colors = "amber"
            subcategories = ["Cheese", "Milk & Cream"]

            [[categories]]
            name = "Produce"
            "#,
        )
        .map_err(|e| crate::errors::Error::Config {
            message: e.to_string(),
        })?;

        seed_categories(&db, &config).await?;
        let first = load_categories(&db).await?;
        assert_eq!(first.len(), 4);

        seed_categories(&db, &config).await?;
        let second = load_categories(&db).await?;
        assert_eq!(second.len(), 4);
        assert_eq!(first, second);

        let dairy = resolve_by_name(&second, "Dairy").unwrap();
        assert_eq!(dairy.colors.as_deref(), Some("amber"));
        assert_eq!(children_of(&second, dairy.id).len(), 2);

        Ok(())
    }
}
