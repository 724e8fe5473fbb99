//! Search query construction from item descriptors.

use pricer_core::ItemDescriptor;

/// Specifics that identify the exact product, in the order they are tried.
pub const IDENTIFYING_SPECIFICS: &[&str] = &["Brand", "Model", "MPN", "Part Number"];

/// Specifics that narrow a product down to a variant.
pub const VARIANT_SPECIFICS: &[&str] = &["Color", "Size", "Type", "Series", "Edition"];

/// Listing filler that only dilutes a search. Compared against upper-cased words.
pub const NOISE_WORDS: &[&str] = &[
    "FAST",
    "FREE",
    "SHIPPING",
    "NEW",
    "USED",
    "NICE",
    "GREAT",
    "EXCELLENT",
    "RARE",
];

/// Builds a marketplace search query from an item descriptor.
///
/// Starts from the title (or the temporary title when the title is blank),
/// then appends identifying and variant specifics in a fixed order. A
/// specific is skipped when its value already appears, case-insensitively,
/// in the terms collected so far. Noise words are dropped from the result.
///
/// Returns an empty string when the descriptor has nothing usable.
#[must_use]
pub fn build_search_query(item: &ItemDescriptor) -> String {
    let mut terms: Vec<&str> = Vec::new();
    if let Some(title) = item.display_title() {
        terms.push(title.trim());
    }

    for name in IDENTIFYING_SPECIFICS.iter().chain(VARIANT_SPECIFICS) {
        let Some(value) = item.specific(name) else {
            continue;
        };
        let value = value.trim();
        let collected = terms.join(" ").to_lowercase();
        if !collected.contains(&value.to_lowercase()) {
            terms.push(value);
        }
    }

    terms
        .join(" ")
        .split_whitespace()
        .filter(|word| !is_noise_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_noise_word(word: &str) -> bool {
    let upper = word.to_uppercase();
    NOISE_WORDS.contains(&upper.as_str())
}

#[cfg(test)]
#[path = "terms_test.rs"]
mod tests;
