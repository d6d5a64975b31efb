//! Random test data

use crate::error::{HarnessError, Result};
use crate::models::{CategoryAdd, Currency, SpendAdd};
use chrono::{DateTime, TimeZone, Utc};
use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Categories random spendings are filed under
pub const CATEGORIES: [&str; 8] = [
    "Groceries",
    "Restaurants",
    "Transport",
    "Education",
    "Travel",
    "Health",
    "Entertainment",
    "Household",
];

const FIRST_NAMES: [&str; 12] = [
    "Anna", "Boris", "Clara", "Dmitry", "Elena", "Felix", "Galina", "Hugo", "Irina", "Jonas",
    "Kira", "Lev",
];

const WORDS: [&str; 16] = [
    "amber", "bright", "cobalt", "dune", "ember", "frost", "grove", "harbor", "island", "jade",
    "kettle", "lantern", "meadow", "north", "orbit", "pine",
];

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Earliest date random spendings are placed at
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// `count` spendings for `username`, each with a distinct three-digit amount
pub fn generate_spendings(count: usize, username: &str) -> Vec<SpendAdd> {
    let mut rng = rand::thread_rng();
    let mut amounts = HashSet::with_capacity(count);
    let upper = 1000u32.max(100 + 2 * count as u32);

    let mut spendings = Vec::with_capacity(count);
    while spendings.len() < count {
        let amount = rng.gen_range(100..upper);
        if !amounts.insert(amount) {
            continue;
        }

        let category = CATEGORIES.choose(&mut rng).copied().unwrap_or(CATEGORIES[0]);
        let currency = Currency::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(Currency::Rub);

        spendings.push(SpendAdd {
            id: None,
            amount: Some(f64::from(amount)),
            description: random_sentence(&mut rng),
            category: Some(CategoryAdd::named(category)),
            spend_date: random_datetime(),
            currency,
            username: Some(username.to_string()),
        });
    }
    spendings
}

fn random_sentence(rng: &mut impl Rng) -> String {
    let words = rng.gen_range(1..=3);
    let mut sentence: Vec<&str> = WORDS.choose_multiple(rng, words).copied().collect();
    if sentence.is_empty() {
        sentence.push(WORDS[0]);
    }
    let mut text = sentence.join(" ");
    if let Some(first) = text.get(..1).map(str::to_uppercase) {
        text.replace_range(..1, &first);
    }
    text.push('.');
    text
}

/// Uniformly random instant between 2000-01-01 and now, as
/// `YYYY-MM-DDThh:mm:ss.000Z`
pub fn random_datetime() -> String {
    random_datetime_between(epoch(), Utc::now())
}

pub fn random_datetime_between(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let span = (end - start).num_seconds().max(0);
    let offset = rand::thread_rng().gen_range(0..=span);
    let instant = start + chrono::Duration::seconds(offset);
    instant.format(DATETIME_FORMAT).to_string()
}

/// `2025-08-31T00:00:00.000Z` → `Aug 31, 2025`, as the frontend shows dates
pub fn format_date(iso: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(iso)
        .map_err(|e| HarnessError::Config(format!("Invalid date {}: {}", iso, e)))?;
    Ok(parsed.format("%b %d, %Y").to_string())
}

/// `<prefix>_<uuid v4>`
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

/// `<First>_<word>_<marker><n>_<index>` with n in 1000..=100000
pub fn random_username(marker: &str, index: usize) -> String {
    let mut rng = rand::thread_rng();
    let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or(FIRST_NAMES[0]);
    let word = WORDS.choose(&mut rng).copied().unwrap_or(WORDS[0]);
    let number = rng.gen_range(1000..=100_000);
    format!("{}_{}_{}{}_{}", first, word, marker, number, index)
}

pub fn random_password(length: usize) -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), length)
}
