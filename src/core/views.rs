//! Derivation engine - Pure view computation over a catalogue snapshot.
//!
//! Everything here is deterministic given `(items, now)`: list and cart
//! partitions, rebuy suggestions, the search filter, and the interval codec
//! used to display `purchase_interval_days` as a `(number, unit)` pair. No
//! function touches the store or the clock.

use crate::core::catalog::CatalogItem;
use chrono::NaiveDateTime;

/// Days before an item is strictly due that it already shows up as a
/// suggestion, to tolerate shopping-trip cadence variance.
pub const SUGGESTION_LEAD_DAYS: i64 = 3;

/// Days per week for interval encoding.
const DAYS_PER_WEEK: i32 = 7;
/// Days per month for interval encoding. Fixed at 30; intentionally not
/// calendar-accurate.
const DAYS_PER_MONTH: i32 = 30;

/// Display unit for a purchase interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    /// Plain days
    Days,
    /// Weeks of 7 days
    Weeks,
    /// Months of 30 days
    Months,
}

impl IntervalUnit {
    /// Days represented by one unit.
    #[must_use]
    pub const fn multiplier(self) -> i32 {
        match self {
            Self::Days => 1,
            Self::Weeks => DAYS_PER_WEEK,
            Self::Months => DAYS_PER_MONTH,
        }
    }

    /// Lowercase unit label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        }
    }
}

/// Decodes a stored day count into the largest exact display unit.
///
/// Prefers months (divisible by 30), then weeks (divisible by 7), and falls
/// back to days.
#[must_use]
pub const fn decode_interval(days: i32) -> (i32, IntervalUnit) {
    if days % DAYS_PER_MONTH == 0 {
        (days / DAYS_PER_MONTH, IntervalUnit::Months)
    } else if days % DAYS_PER_WEEK == 0 {
        (days / DAYS_PER_WEEK, IntervalUnit::Weeks)
    } else {
        (days, IntervalUnit::Days)
    }
}

/// Encodes a `(number, unit)` pair back into a day count.
#[must_use]
pub const fn encode_interval(number: i32, unit: IntervalUnit) -> i32 {
    number * unit.multiplier()
}

/// Items on the list but not yet in the cart, sorted for display.
///
/// Sort key is `(category, subcategory, name)`, ascending and
/// case-insensitive; items without a category (or subcategory) sort before
/// any named one, since the empty string compares lowest.
#[must_use]
pub fn list_items(items: &[CatalogItem]) -> Vec<&CatalogItem> {
    let mut listed: Vec<&CatalogItem> = items
        .iter()
        .filter(|i| i.on_list && !i.in_cart)
        .collect();
    listed.sort_by_key(|i| {
        (
            i.category.to_lowercase(),
            i.subcategory.to_lowercase(),
            i.name.to_lowercase(),
        )
    });
    listed
}

/// Items currently in the cart, in store order.
#[must_use]
pub fn cart_items(items: &[CatalogItem]) -> Vec<&CatalogItem> {
    items.iter().filter(|i| i.on_list && i.in_cart).collect()
}

/// Items due (or nearly due) for repurchase.
///
/// An item qualifies when it is off the list, has a positive configured
/// interval, and was purchased at least `interval - 3` whole days ago. An item
/// that has never been purchased has no cadence baseline and is never
/// suggested; an item already on the list is never suggested twice.
#[must_use]
pub fn suggestions<'a>(items: &'a [CatalogItem], now: NaiveDateTime) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|i| !i.on_list)
        .filter(|i| {
            let (Some(interval), Some(last)) = (i.purchase_interval_days, i.last_purchased)
            else {
                return false;
            };
            if interval <= 0 {
                return false;
            }
            let elapsed = (now - last).num_days();
            elapsed >= (i64::from(interval) - SUGGESTION_LEAD_DAYS).max(0)
        })
        .collect()
}

/// Case-insensitive substring search on item name, over the full catalogue.
#[must_use]
pub fn search<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|i| i.name.to_lowercase().contains(&needle))
        .collect()
}
