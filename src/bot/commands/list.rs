//! Shopping list and cart Discord commands.
//!
//! This module contains the commands that move items on and off the shopping
//! list, through the cart, and out via checkout, plus the rebuy suggestion
//! view. Every mutation refreshes the catalogue snapshot before the reply is
//! rendered.

use crate::core::catalog::CatalogItem;

/// Renders one catalogue item as a display line with its category badges and
/// notes.
pub(crate) fn format_item_line(item: &CatalogItem) -> String {
    let mut line = format!("• **{}**", item.name);
    if !item.category.is_empty() {
        line.push_str(" [");
        line.push_str(&item.category);
        if !item.subcategory.is_empty() {
            line.push_str(" / ");
            line.push_str(&item.subcategory);
        }
        line.push(']');
    }
    if !item.notes.is_empty() {
        line.push_str(" - ");
        line.push_str(&item.notes);
    }
    line
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::format_item_line;
    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{item, views},
        errors::{Error, Result},
    };

    /// Shows the current shopping list, grouped by category.
    ///
    /// Items already moved to the cart are not shown here; see `/cart`.
    #[poise::command(slash_command)]
    pub async fn shopping_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().refresh_catalog().await?;
        let snapshot = ctx.data().snapshot().await;

        let listed = views::list_items(&snapshot.items);
        if listed.is_empty() {
            ctx.say("The shopping list is empty.").await?;
            return Ok(());
        }

        let mut lines = vec!["**Shopping List**".to_string()];
        let mut current_group: Option<&str> = None;
        for item in listed {
            let group: &str = if item.category.is_empty() {
                "Uncategorized"
            } else {
                &item.category
            };
            if current_group != Some(group) {
                lines.push(format!("__{group}__"));
                current_group = Some(group);
            }
            lines.push(format_item_line(item));
        }

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Puts a catalogue item onto the shopping list.
    #[poise::command(slash_command)]
    pub async fn list_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item to put on the list"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = item::get_item_by_name(db, &item).await? else {
            ctx.say(format!("❌ No catalogue item named '{item}'.")).await?;
            return Ok(());
        };

        let updated = item::set_list_membership(db, existing.id, true).await?;
        ctx.data().refresh_catalog().await?;

        ctx.say(format!("✅ '{}' is on the shopping list.", updated.name))
            .await?;
        Ok(())
    }

    /// Takes an item off the shopping list (and out of the cart).
    #[poise::command(slash_command)]
    pub async fn list_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item to take off the list"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = item::get_item_by_name(db, &item).await? else {
            ctx.say(format!("❌ No catalogue item named '{item}'.")).await?;
            return Ok(());
        };

        let updated = item::set_list_membership(db, existing.id, false).await?;
        ctx.data().refresh_catalog().await?;

        ctx.say(format!("✅ '{}' is off the shopping list.", updated.name))
            .await?;
        Ok(())
    }

    /// Shows what is currently in the cart.
    #[poise::command(slash_command)]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().refresh_catalog().await?;
        let snapshot = ctx.data().snapshot().await;

        let carted = views::cart_items(&snapshot.items);
        if carted.is_empty() {
            ctx.say("The cart is empty.").await?;
            return Ok(());
        }

        let mut lines = vec!["**Cart**".to_string()];
        for item in carted {
            lines.push(format_item_line(item));
        }
        lines.push("\nUse `/checkout` when you're done shopping.".to_string());

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Moves a listed item into the cart, or back out of it.
    #[poise::command(slash_command)]
    pub async fn cart_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item to move in or out of the cart"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = item::get_item_by_name(db, &item).await? else {
            ctx.say(format!("❌ No catalogue item named '{item}'.")).await?;
            return Ok(());
        };

        match item::toggle_cart(db, existing.id).await {
            Ok(updated) => {
                ctx.data().refresh_catalog().await?;
                if updated.in_cart {
                    ctx.say(format!("✅ '{}' is in the cart.", updated.name))
                        .await?;
                } else {
                    ctx.say(format!("✅ '{}' is back on the list.", updated.name))
                        .await?;
                }
            }
            Err(Error::Config { message }) => {
                ctx.say(format!("❌ {message}.")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Checks out the cart: everything in it comes off the list.
    ///
    /// Each checked-out item gets its purchase date stamped, which feeds
    /// future `/suggest` results.
    #[poise::command(slash_command)]
    pub async fn checkout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().refresh_catalog().await?;
        let snapshot = ctx.data().snapshot().await;

        let cart_ids: Vec<i64> = views::cart_items(&snapshot.items)
            .into_iter()
            .map(|i| i.id)
            .collect();

        if cart_ids.is_empty() {
            ctx.say("The cart is empty; nothing to check out.").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let now = chrono::Utc::now().naive_utc();
        let cleared = item::clear_cart(db, &cart_ids, now).await?;
        ctx.data().refresh_catalog().await?;

        ctx.say(format!(
            "✅ Checked out {cleared} item{}.",
            if cleared == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }

    /// Shows items that look due (or nearly due) for a rebuy.
    #[poise::command(slash_command)]
    pub async fn suggest(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().refresh_catalog().await?;
        let snapshot = ctx.data().snapshot().await;

        let now = chrono::Utc::now().naive_utc();
        let due = views::suggestions(&snapshot.items, now);
        if due.is_empty() {
            ctx.say("Nothing looks due for a rebuy right now.").await?;
            return Ok(());
        }

        let mut lines = vec!["**Time to rebuy?**".to_string()];
        for item in due {
            let mut line = format_item_line(item);
            if let (Some(days), Some(last)) = (item.purchase_interval_days, item.last_purchased) {
                let elapsed = (now - last).num_days();
                let (n, unit) = views::decode_interval(days);
                line.push_str(&format!(
                    " (bought {elapsed} days ago, rebuy every {n} {})",
                    unit.label()
                ));
            }
            lines.push(line);
        }
        lines.push("\nUse `/list_add` to put one back on the list.".to_string());

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
