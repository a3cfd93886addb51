use crate::assets::{AssetUrls, CrestTheme, crest_theme};
use crate::colors::{ColorPalette, compute_palette};
use crate::model::{PlayerRecord, RarityDefinition};

pub const OUTFIELD_ATTRIBUTE_LABELS: [&str; 6] = ["PAC", "SHO", "PAS", "DRI", "DEF", "PHY"];
pub const GK_ATTRIBUTE_LABELS: [&str; 6] = ["DIV", "HAN", "KIC", "REF", "SPD", "POS"];

/// Everything a renderer needs to draw one player card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub player_id: u64,
    pub display_name: String,
    pub rating: i64,
    pub position: String,
    pub alt_positions: Vec<String>,
    pub is_goalkeeper: bool,
    pub attributes: Vec<(&'static str, i64)>,
    pub skill_moves: i64,
    pub weak_foot: i64,
    pub rarity_name: String,
    pub palette: ColorPalette,
    pub crest_theme: CrestTheme,
    pub card_url: String,
    /// Tried in order; the base item's portrait covers special cards without art.
    pub portrait_urls: [String; 2],
    pub nation_url: String,
    pub league_url: String,
    pub club_url: String,
    pub playstyle_plus_urls: Vec<String>,
    pub link: String,
}

impl CardView {
    pub fn build(player: &PlayerRecord, rarities: &[RarityDefinition], urls: &AssetUrls) -> Self {
        let rarity = rarities.iter().find(|r| r.id == player.rarity);
        let palette = compute_palette(rarity, player.rating);
        let theme = crest_theme(palette.use_light_crest);
        let display_name = display_name(player).to_string();
        let is_goalkeeper = player.position.first().is_some_and(|p| p == "GK");
        let labels = if is_goalkeeper {
            GK_ATTRIBUTE_LABELS
        } else {
            OUTFIELD_ATTRIBUTE_LABELS
        };
        let attributes = labels
            .iter()
            .zip(player.attributes.iter())
            .map(|(label, value)| (*label, *value))
            .collect();
        let level_count = rarity.map(|r| r.level_count).unwrap_or(0);
        let rarity_name = match rarity {
            Some(r) if !r.name.is_empty() => r.name.clone(),
            _ => player.rarity_name.clone(),
        };

        Self {
            player_id: player.id,
            link: format!("/player/{}-{}", slugify(&display_name), player.id),
            display_name,
            rating: player.rating,
            position: player.position.first().cloned().unwrap_or_default(),
            alt_positions: player.position.iter().skip(1).cloned().collect(),
            is_goalkeeper,
            attributes,
            skill_moves: player.skill_moves,
            weak_foot: player.weak_foot,
            rarity_name,
            card_url: urls.card_background(level_count, player.rating, player.rarity),
            portrait_urls: [urls.portrait(player.id), urls.portrait(player.base_id)],
            nation_url: urls.crest("nation", player.nation, theme),
            league_url: urls.crest("league", player.leagueid, theme),
            club_url: urls.crest("club", player.teamid, theme),
            playstyle_plus_urls: player
                .playstyle_plus
                .iter()
                .map(|id| urls.trait_icon(id))
                .collect(),
            palette,
            crest_theme: theme,
        }
    }
}

pub fn display_name(player: &PlayerRecord) -> &str {
    if !player.c_name.is_empty() {
        &player.c_name
    } else if !player.name.is_empty() {
        &player.name
    } else {
        "Unknown"
    }
}

/// Lowercases and replaces every character outside `[a-z0-9]` with `-`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_replaces_non_alnum() {
        assert_eq!(slugify("Kylian Mbappé"), "kylian-mbapp-");
        assert_eq!(slugify("O'Neil 2"), "o-neil-2");
    }
}
