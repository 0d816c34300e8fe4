//! Database configuration module for `GroceryBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Category, Item};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/grocery_buddy.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate
/// proper SQL statements for table creation, ensuring the database schema
/// matches the Rust struct definitions. It creates tables for categories and
/// items.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let category_table = schema.create_table_from_entity(Category);
    let item_table = schema.create_table_from_entity(Item);

    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&item_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CategoryModel, ItemModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;

        Ok(())
    }
}
