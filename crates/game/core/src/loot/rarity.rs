//! Rarity rolls and name prefixes for generated items.

use crate::env::RngOracle;
use crate::items::Rarity;

/// Unnormalised drop weight of a rarity under `boost`.
///
/// # Formula
///
/// ```text
/// common    0.485 / boost
/// uncommon  0.2   / boost
/// rare      0.15  * boost
/// epic      0.1   * boost
/// legendary 0.05  * boost
/// divine    0.01  * boost
/// unknown   0.005
/// ```
pub fn weight(rarity: Rarity, boost: f64) -> f64 {
    let boost = if boost > 0.0 { boost } else { 1.0 };
    match rarity {
        Rarity::Common => 0.485 / boost,
        Rarity::Uncommon => 0.2 / boost,
        Rarity::Rare => 0.15 * boost,
        Rarity::Epic => 0.1 * boost,
        Rarity::Legendary => 0.05 * boost,
        Rarity::Divine => 0.01 * boost,
        Rarity::Unknown => 0.005,
    }
}

pub const fn prefixes(rarity: Rarity) -> &'static [&'static str] {
    match rarity {
        Rarity::Common => &["Common", "Basic", "Standard", "Ordinary", "Usual", "Normal"],
        Rarity::Uncommon => &["Uncommon", "Sharp", "Sturdy", "Reliable", "Balanced"],
        Rarity::Rare => &["Rare", "Advanced", "Superior"],
        Rarity::Epic => &["Epic", "Exceptional", "Impressive", "Masterwork"],
        Rarity::Legendary => &["Legendary", "Ancient", "Mythical", "Enchanted"],
        Rarity::Divine => &[
            "Divine",
            "Holy",
            "Sacred",
            "Blessed",
            "Miraculous",
            "Supernatural",
            "Celestial",
        ],
        Rarity::Unknown => &["Unknown"],
    }
}

/// Rarities reachable at an item level.
///
/// Low levels are capped to the first `level + 2` entries; once the level
/// exceeds the list length every rarity is available.
pub fn available_at(rarities: &[Rarity], level: u32) -> &[Rarity] {
    let level = level as usize;
    if level <= rarities.len() {
        &rarities[..(level + 2).min(rarities.len())]
    } else {
        rarities
    }
}

/// Weighted rarity draw. Falls back to common when nothing is available.
pub fn roll(available: &[Rarity], boost: f64, rng: &mut dyn RngOracle) -> Rarity {
    let weights: Vec<f64> = available.iter().map(|r| weight(*r, boost)).collect();
    rng.weighted_index(&weights)
        .and_then(|index| available.get(index).copied())
        .unwrap_or(Rarity::Common)
}

pub fn roll_prefix(rarity: Rarity, rng: &mut dyn RngOracle) -> &'static str {
    let options = prefixes(rarity);
    rng.choose_index(options.len())
        .and_then(|index| options.get(index).copied())
        .unwrap_or("")
}
