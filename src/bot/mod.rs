//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the GroceryBuddy
//! application, including all slash commands, autocomplete handlers, and bot
//! context management. The command handlers own the mutate-refresh-derive
//! cycle: every successful mutation is followed by a full catalogue refresh
//! before any view is rendered.

/// Discord command implementations (item, list, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::catalog::Catalog,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
///
/// Holds the store connection and the current catalogue snapshot. The
/// snapshot is replaced wholesale on every successful refresh and left
/// untouched when a refresh fails, so readers always see a consistent (if
/// possibly stale) view.
pub struct BotData {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Current catalogue snapshot
    pub catalog: RwLock<Catalog>,
}

impl BotData {
    /// Creates a new `BotData` instance from the store connection and an
    /// initial catalogue snapshot.
    #[must_use]
    pub fn new(database: DatabaseConnection, catalog: Catalog) -> Self {
        Self {
            database,
            catalog: RwLock::new(catalog),
        }
    }

    /// Replaces the catalogue snapshot with a fresh read from the store.
    ///
    /// On failure the existing snapshot is kept and the error is propagated
    /// to the caller; no retry is attempted.
    ///
    /// # Errors
    /// Returns an error if the store read fails.
    pub async fn refresh_catalog(&self) -> Result<()> {
        let fresh = Catalog::refresh(&self.database).await?;
        *self.catalog.write().await = fresh;
        Ok(())
    }

    /// Clones the current catalogue snapshot for derivation.
    pub async fn snapshot(&self) -> Catalog {
        self.catalog.read().await.clone()
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Runs the Discord bot until the client stops.
///
/// Registers all slash commands globally and hands each invocation the shared
/// [`BotData`].
///
/// # Errors
/// Returns an error if the client cannot be created or exits with a failure.
#[instrument(skip_all)]
pub async fn run_bot(token: String, database: DatabaseConnection, catalog: Catalog) -> Result<()> {
    use poise::serenity_prelude as serenity;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::categories(),
                commands::item_manage(),
                commands::shopping_list(),
                commands::list_add(),
                commands::list_remove(),
                commands::cart(),
                commands::cart_toggle(),
                commands::checkout(),
                commands::suggest(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, catalog))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES | serenity::GatewayIntents::DIRECT_MESSAGES;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    info!("Starting bot client...");
    client.start().await.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_refresh_replaces_snapshot_wholesale() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_item(&db, "Milk").await?;

        let data = BotData::new(db, Catalog::default());
        assert!(data.snapshot().await.items.is_empty());

        data.refresh_catalog().await?;
        let snapshot = data.snapshot().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].name, "Milk");

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_snapshot() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_item(&db, "Milk").await?;

        let data = BotData::new(db.clone(), Catalog::default());
        data.refresh_catalog().await?;

        // Break the store out from under the snapshot
        db.execute_unprepared("DROP TABLE items").await?;

        assert!(data.refresh_catalog().await.is_err());

        // Stale but consistent: the previous snapshot is still served
        let snapshot = data.snapshot().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].name, "Milk");

        Ok(())
    }
}
