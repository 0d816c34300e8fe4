//! Item catalogue Discord commands - `item_manage` and its subcommands.
//!
//! This module contains commands for maintaining the item catalogue: adding,
//! rewriting, permanently deleting, and searching items.

use crate::core::views::IntervalUnit;

/// Small words left uncapitalized inside a title, per the usual title-case
/// convention. First and last words are always capitalized.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "in",
    "of", "over", "with",
];

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Normalizes a typed item name into title case, keeping small words
/// lowercase except at the ends and capitalizing each hyphenated part.
pub(crate) fn title_case(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            word.split('-')
                .map(|part| {
                    if i == 0 || i == last || !SMALL_WORDS.contains(&part) {
                        capitalize(part)
                    } else {
                        part.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_unit(unit: &str) -> Option<IntervalUnit> {
    match unit.trim().to_lowercase().as_str() {
        "day" | "days" => Some(IntervalUnit::Days),
        "week" | "weeks" => Some(IntervalUnit::Weeks),
        "month" | "months" => Some(IntervalUnit::Months),
        _ => None,
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{parse_unit, title_case};
    use crate::{
        bot::{BotData, commands::list::format_item_line, handlers::autocomplete},
        core::{category, item, item::ItemDraft, views},
        errors::{Error, Result},
    };

    /// Parent command for maintaining the item catalogue.
    #[poise::command(
        slash_command,
        subcommands("item_add", "item_update", "item_delete", "item_search")
    )]
    pub async fn item_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Item catalogue command. Available subcommands:\n\
            `/item_manage add` - Add a new item\n\
            `/item_manage update` - Rewrite an item's details\n\
            `/item_manage delete` - Permanently delete an item\n\
            `/item_manage search` - Search the catalogue by name";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Resolves optional category/subcategory names against the hierarchy,
    /// replying with an error message and returning None on a bad reference.
    async fn resolve_tags(
        ctx: poise::Context<'_, BotData, Error>,
        category_name: Option<String>,
        subcategory_name: Option<String>,
    ) -> Result<Option<(Option<i64>, Option<i64>)>> {
        let categories = category::load_categories(&ctx.data().database).await?;

        let category_id = match category_name {
            Some(name) => {
                let found = category::resolve_by_name(&categories, &name)
                    .filter(|c| c.parent_id.is_none());
                match found {
                    Some(c) => Some(c.id),
                    None => {
                        ctx.say(format!("❌ Unknown category '{name}'.")).await?;
                        return Ok(None);
                    }
                }
            }
            None => None,
        };

        let subcategory_id = match subcategory_name {
            Some(name) => {
                let Some(parent_id) = category_id else {
                    ctx.say("❌ A subcategory needs a category.").await?;
                    return Ok(None);
                };
                let found = category::children_of(&categories, parent_id)
                    .into_iter()
                    .find(|c| c.name == name);
                match found {
                    Some(c) => Some(c.id),
                    None => {
                        ctx.say(format!(
                            "❌ Unknown subcategory '{name}' under the selected category.",
                        ))
                        .await?;
                        return Ok(None);
                    }
                }
            }
            None => None,
        };

        Ok(Some((category_id, subcategory_id)))
    }

    /// Turns optional `(number, unit)` command arguments into a day count,
    /// replying with an error message and returning None on bad input.
    async fn resolve_interval(
        ctx: poise::Context<'_, BotData, Error>,
        number: Option<i32>,
        unit: Option<String>,
    ) -> Result<Option<Option<i32>>> {
        let Some(number) = number else {
            return Ok(Some(None));
        };

        if number <= 0 {
            ctx.say("❌ The repurchase interval must be a positive number.")
                .await?;
            return Ok(None);
        }

        let unit = match unit.as_deref() {
            None => views::IntervalUnit::Days,
            Some(raw) => match parse_unit(raw) {
                Some(unit) => unit,
                None => {
                    ctx.say("❌ Interval unit must be days, weeks, or months.")
                        .await?;
                    return Ok(None);
                }
            },
        };

        Ok(Some(Some(views::encode_interval(number, unit))))
    }

    /// Adds a new item to the catalogue.
    ///
    /// The name is normalized to title case. An interval like `2 weeks` is
    /// stored as a day count; set `on_list` to put the item straight onto the
    /// shopping list.
    #[poise::command(slash_command, rename = "add")]
    pub async fn item_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the item (e.g., 'Oat Milk')"] name: String,
        #[description = "Category for the item"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category: Option<String>,
        #[description = "Subcategory under the chosen category"]
        #[autocomplete = "autocomplete::autocomplete_subcategory_name"]
        subcategory: Option<String>,
        #[description = "Free-form notes"] notes: Option<String>,
        #[description = "Repurchase every this many units"] interval_number: Option<i32>,
        #[description = "Interval unit: days, weeks, or months"] interval_unit: Option<String>,
        #[description = "Put the item straight onto the shopping list"] on_list: Option<bool>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            ctx.say("❌ Item name cannot be empty.").await?;
            return Ok(());
        }

        let Some((category_id, subcategory_id)) = resolve_tags(ctx, category, subcategory).await?
        else {
            return Ok(());
        };
        let Some(purchase_interval_days) =
            resolve_interval(ctx, interval_number, interval_unit).await?
        else {
            return Ok(());
        };

        let display_name = title_case(&name);
        let on_list = on_list.unwrap_or(false);
        let db = &ctx.data().database;

        let draft = ItemDraft {
            name: display_name.clone(),
            notes: notes.filter(|n| !n.trim().is_empty()),
            category_id,
            subcategory_id,
            purchase_interval_days,
        };

        let created = item::create_item(db, draft, on_list).await?;
        ctx.data().refresh_catalog().await?;

        let mut message = format!("✅ Added '{}' to the catalogue", created.name);
        if let Some(days) = created.purchase_interval_days {
            let (n, unit) = views::decode_interval(days);
            message.push_str(&format!(", rebuy every {n} {}", unit.label()));
        }
        if on_list {
            message.push_str(" (on the shopping list)");
        }
        message.push('.');

        ctx.say(message).await?;
        Ok(())
    }

    /// Rewrites an item's catalogue details.
    ///
    /// This is a full rewrite of the editable fields: anything not supplied is
    /// cleared, except the name which stays unchanged when `new_name` is
    /// omitted. List and cart state are untouched.
    #[poise::command(slash_command, rename = "update")]
    pub async fn item_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item to update"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "New name for the item"] new_name: Option<String>,
        #[description = "Category for the item"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category: Option<String>,
        #[description = "Subcategory under the chosen category"]
        #[autocomplete = "autocomplete::autocomplete_subcategory_name"]
        subcategory: Option<String>,
        #[description = "Free-form notes"] notes: Option<String>,
        #[description = "Repurchase every this many units"] interval_number: Option<i32>,
        #[description = "Interval unit: days, weeks, or months"] interval_unit: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = item::get_item_by_name(db, &item).await? else {
            ctx.say(format!("❌ No catalogue item named '{item}'.")).await?;
            return Ok(());
        };

        let Some((category_id, subcategory_id)) = resolve_tags(ctx, category, subcategory).await?
        else {
            return Ok(());
        };
        let Some(purchase_interval_days) =
            resolve_interval(ctx, interval_number, interval_unit).await?
        else {
            return Ok(());
        };

        let draft = ItemDraft {
            name: new_name.unwrap_or_else(|| existing.name.clone()),
            notes: notes.filter(|n| !n.trim().is_empty()),
            category_id,
            subcategory_id,
            purchase_interval_days,
        };

        let updated = item::update_item(db, existing.id, draft).await?;
        ctx.data().refresh_catalog().await?;

        ctx.say(format!("✅ Updated '{}'.", updated.name)).await?;
        Ok(())
    }

    /// Permanently deletes an item from the catalogue.
    ///
    /// There is no undo; the item and its purchase history are gone.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn item_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item to delete"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = item::get_item_by_name(db, &item).await? else {
            ctx.say(format!("❌ No catalogue item named '{item}'.")).await?;
            return Ok(());
        };

        item::delete_item(db, existing.id).await?;
        ctx.data().refresh_catalog().await?;

        ctx.say(format!("✅ Deleted '{}' from the catalogue.", existing.name))
            .await?;
        Ok(())
    }

    /// Searches the full catalogue by name.
    #[poise::command(slash_command, rename = "search")]
    pub async fn item_search(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Part of an item name to look for"] query: String,
    ) -> Result<()> {
        ctx.data().refresh_catalog().await?;
        let snapshot = ctx.data().snapshot().await;

        let hits = views::search(&snapshot.items, &query);
        if hits.is_empty() {
            ctx.say(format!("No items matching '{query}'.")).await?;
            return Ok(());
        }

        let mut lines = vec![format!("**Items matching '{query}'**")];
        for item in hits {
            lines.push(format_item_line(item));
        }

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
