//! Static sector keyword table.
//!
//! Maps a coarse sector name to the set of raw industry tags that count as
//! members. This is configuration data, not logic: the upstream data source
//! labels instruments with free-text industry tags, and the scorer filters
//! against this table.

/// Sector names with a configured keyword set, in table order.
pub const AVAILABLE_SECTORS: &[&str] = &[
    "technology",
    "fashion",
    "healthcare",
    "finance",
    "automotive",
    "food",
    "entertainment",
    "energy",
    "consumer_goods",
    "real_estate",
];

/// Industry tags accepted for a sector, matched case-insensitively.
///
/// An unconfigured sector name yields an empty slice, so filtering by it
/// produces an empty result rather than an error.
pub fn sector_keywords(sector: &str) -> &'static [&'static str] {
    match sector.to_lowercase().as_str() {
        "technology" => &["technology", "e-commerce", "social media"],
        "fashion" => &["fitness", "footwear", "apparel", "retail"],
        "healthcare" => &["healthcare"],
        "finance" => &["finance", "cryptocurrency"],
        "automotive" => &["automotive", "aviation"],
        "food" => &["food", "food & beverage"],
        "entertainment" => &["entertainment", "gaming", "music"],
        "energy" => &["energy"],
        "consumer_goods" => &["consumer goods"],
        "real_estate" => &["hospitality"],
        _ => &[],
    }
}
