//! `GroceryBuddy` binary entry point.

use dotenvy::dotenv;
use grocery_buddy::{
    bot,
    config,
    core::{catalog::Catalog, category},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Connect to the store and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed the category hierarchy from config.toml
    let category_config = config::categories::load_default_config()
        .inspect_err(|e| error!("Failed to load category configuration: {e}"))?;
    category::seed_categories(&db, &category_config)
        .await
        .inspect(|()| info!("Category hierarchy seeded."))
        .inspect_err(|e| error!("Failed to seed categories: {e}"))?;

    // 5. Take the initial catalogue snapshot
    let catalog = Catalog::refresh(&db)
        .await
        .inspect(|c| info!("Loaded {} catalogue items.", c.items.len()))
        .inspect_err(|e| error!("Failed to load the catalogue: {e}"))?;

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, db, catalog).await
}
