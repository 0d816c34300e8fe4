//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! item names and category names, improving the user experience by suggesting
//! valid options as the user types. Item suggestions come from the in-memory
//! catalogue snapshot; category suggestions read the (startup-seeded, rarely
//! changing) hierarchy from the store.

use crate::{
    bot::BotData,
    core::category,
    errors::Error,
};

/// Discord caps autocomplete responses at 25 entries.
const AUTOCOMPLETE_LIMIT: usize = 25;

/// Provides autocomplete suggestions for item names.
///
/// Matches the user's partial input case-insensitively against the current
/// catalogue snapshot and returns up to 25 matching item names.
pub async fn autocomplete_item_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = ctx
        .data()
        .catalog
        .read()
        .await
        .items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&partial_lower))
        .map(|item| item.name.clone())
        .take(AUTOCOMPLETE_LIMIT)
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching
}

/// Provides autocomplete suggestions for top-level category names.
pub async fn autocomplete_category_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(categories) = category::load_categories(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = category::top_level(&categories)
        .into_iter()
        .filter(|cat| cat.name.to_lowercase().contains(&partial_lower))
        .map(|cat| cat.name.clone())
        .take(AUTOCOMPLETE_LIMIT)
        .collect();

    matching.sort();
    matching
}

/// Provides autocomplete suggestions for subcategory names.
///
/// Poise autocomplete cannot see the other parameters of the command being
/// typed, so this suggests across all subcategories; the chosen pairing is
/// validated against the hierarchy when the command runs.
pub async fn autocomplete_subcategory_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(categories) = category::load_categories(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = categories
        .iter()
        .filter(|cat| cat.parent_id.is_some())
        .filter(|cat| cat.name.to_lowercase().contains(&partial_lower))
        .map(|cat| cat.name.clone())
        .take(AUTOCOMPLETE_LIMIT)
        .collect();

    matching.sort();
    matching
}
