//! General Discord commands - ping, help, and the category overview.
//! This module contains simple commands that provide basic bot functionality
//! and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::category,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    ///
    /// This command provides users with information about all available bot commands
    /// and their usage, helping them understand the bot's capabilities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**GroceryBuddy Help**\n\
        Here is a summary of all available commands for GroceryBuddy.\n\n\
        **Shopping Commands**\n\
        • `/shopping_list` - Shows the current shopping list, grouped by category.\n\
        • `/list_add <item>` - Puts a catalogue item on the shopping list.\n\
        • `/list_remove <item>` - Takes an item off the list (and out of the cart).\n\
        • `/cart` - Shows what's in the cart.\n\
        • `/cart_toggle <item>` - Moves a listed item into or out of the cart.\n\
        • `/checkout` - Checks out everything in the cart and stamps it purchased.\n\
        • `/suggest` - Items that look due for a rebuy.\n\n\
        **Catalogue Commands**\n\
        • `/item_manage add` - Add a new item to the catalogue.\n\
        • `/item_manage update` - Rewrite an item's details.\n\
        • `/item_manage delete` - Permanently delete an item.\n\
        • `/item_manage search` - Search the catalogue by name.\n\
        • `/categories` - Shows the category hierarchy.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the category hierarchy with its subcategories and colour hints.
    #[poise::command(slash_command)]
    pub async fn categories(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let all = category::load_categories(db).await?;

        if all.is_empty() {
            ctx.say("No categories configured yet.").await?;
            return Ok(());
        }

        let mut lines = vec!["**Categories**".to_string()];
        for parent in category::top_level(&all) {
            let colour = parent
                .colors
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            lines.push(format!("• **{}**{colour}", parent.name));

            for child in category::children_of(&all, parent.id) {
                lines.push(format!("    ◦ {}", child.name));
            }
        }

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
