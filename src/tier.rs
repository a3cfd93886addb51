/// Rating at or above which a tiered rarity uses its top color/background slice.
pub const GOLD_RATING: i64 = 75;
/// Rating at or above which a tiered rarity uses its middle slice.
pub const SILVER_RATING: i64 = 65;

/// Maps a rating onto the 1-3 tier of a tiered rarity.
///
/// Rarities without levels (`level_count == 0`) are not tiered and always
/// report tier `0`. Both the palette and the card background go through this
/// function so the two can never disagree.
pub fn tier_for_rating(level_count: u32, rating: i64) -> u32 {
    if level_count == 0 {
        return 0;
    }
    if rating >= GOLD_RATING {
        3
    } else if rating >= SILVER_RATING {
        2
    } else {
        1
    }
}
