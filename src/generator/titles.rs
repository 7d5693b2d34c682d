//! Best-effort normalization of a free-text numbered title list.
//!
//! Providers are asked for "1. Title" lines but answer with whatever they
//! like: bold markers, quoted titles, a chatty preamble. Only lines that
//! carry a numeral are considered, and list markers and emphasis are trimmed
//! off both ends.

use std::collections::HashSet;

/// Titles offered per batch
pub const TITLE_COUNT: usize = 5;

/// Cooking styles used, by position, to pad short batches
pub const FALLBACK_STYLES: [&str; TITLE_COUNT] =
    ["Grilled", "Baked", "Sautéed", "Roasted", "Stir-Fried"];

/// Extract candidate titles from raw provider text, preserving first-seen
/// order and dropping exact duplicates and lines that clean up to nothing.
pub fn parse_titles(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.lines()
        .filter(|line| line.chars().any(|c| c.is_ascii_digit()))
        .map(clean_title)
        .filter(|title| !title.is_empty())
        .filter(|title| seen.insert(title.clone()))
        .collect()
}

fn clean_title(line: &str) -> String {
    let mut title = trim_title_end(line.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c.is_whitespace() || c.is_ascii_punctuation()
    }));

    // A closing bracket whose opener went with the leading markers
    while let Some(rest) = title
        .strip_suffix(']')
        .filter(|t| !t.contains('['))
        .or_else(|| title.strip_suffix(')').filter(|t| !t.contains('(')))
    {
        title = trim_title_end(rest);
    }

    title.to_string()
}

fn trim_title_end(title: &str) -> &str {
    title.trim_end_matches(|c: char| {
        c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '.' | '-' | '*' | '_' | '"' | '\'' | '`')
    })
}

/// First comma-separated ingredient, trimmed and capitalized the way a
/// sentence is: first letter upper case, the rest lower case.
pub fn main_ingredient(ingredients: &str) -> String {
    let first = ingredients.split(',').next().unwrap_or_default().trim();

    let mut chars = first.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Join title words, skipping an empty ingredient so no double spaces appear.
fn phrase(words: &[&str]) -> String {
    words
        .iter()
        .filter(|w| !w.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Padding title for `position` (0-based) in a batch.
pub fn fallback_title(position: usize, main_ingredient: &str) -> String {
    let style = FALLBACK_STYLES[position % TITLE_COUNT];
    phrase(&[style, main_ingredient, "Special"])
}

/// Title repeated across a batch when the provider could not be used at all.
pub fn quick_title(main_ingredient: &str) -> String {
    phrase(&["Quick", main_ingredient, "Dish"])
}

/// Fill a batch of exactly [`TITLE_COUNT`] titles.
///
/// Parsed titles keep their order; missing positions get the fallback style
/// for that position; extras are dropped. Returns the batch and the number of
/// fallback titles used.
pub fn fill_titles(parsed: Vec<String>, ingredients: &str) -> ([String; TITLE_COUNT], usize) {
    let main = main_ingredient(ingredients);
    let fallbacks = TITLE_COUNT.saturating_sub(parsed.len());
    let mut parsed = parsed.into_iter();

    // from_fn visits positions in increasing order
    let titles = std::array::from_fn(|position| {
        parsed
            .next()
            .unwrap_or_else(|| fallback_title(position, &main))
    });

    (titles, fallbacks)
}
