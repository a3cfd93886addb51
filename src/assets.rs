//! CDN image URLs for cards, portraits, crests and trait icons.
//!
//! Ids and categories are interpolated verbatim. A bad id yields a URL that
//! 404s; picking a fallback image is the renderer's job.

use std::fmt::Display;

use crate::config::Config;
use crate::tier::tier_for_rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrestTheme {
    Light,
    Dark,
}

impl CrestTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            CrestTheme::Light => "light",
            CrestTheme::Dark => "dark",
        }
    }
}

pub fn crest_theme(use_light_crest: u8) -> CrestTheme {
    if use_light_crest == 1 {
        CrestTheme::Light
    } else {
        CrestTheme::Dark
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    pub cdn_base_url: String,
    pub ea_base_url: String,
}

impl AssetUrls {
    pub fn new(cdn_base_url: impl Into<String>, ea_base_url: impl Into<String>) -> Self {
        Self {
            cdn_base_url: cdn_base_url.into(),
            ea_base_url: ea_base_url.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.cdn_base_url.clone(), cfg.ea_base_url.clone())
    }

    pub fn dynamic(&self, category: &str, id: impl Display, theme: Option<&str>) -> String {
        match theme {
            Some(theme) => format!("{}/{category}/{theme}/{id}.png", self.cdn_base_url),
            None => format!("{}/{category}/{id}.png", self.cdn_base_url),
        }
    }

    pub fn crest(&self, category: &str, id: impl Display, theme: CrestTheme) -> String {
        self.dynamic(category, id, Some(theme.as_str()))
    }

    pub fn portrait(&self, player_id: impl Display) -> String {
        format!("{}/player/{player_id}.webp", self.cdn_base_url)
    }

    pub fn card_background(&self, level_count: u32, rating: i64, rarity_id: impl Display) -> String {
        let tier = tier_for_rating(level_count, rating);
        format!("{}/card/l_{tier}_r_{rarity_id}.png", self.cdn_base_url)
    }

    pub fn trait_icon(&self, playstyle_id: impl Display) -> String {
        self.dynamic("traits", playstyle_id, None)
    }

    pub fn sbc_icon(&self, setid: impl Display) -> String {
        self.dynamic("sbc", setid, None)
    }

    pub fn challenge_image(&self, image_id: &str) -> String {
        format!(
            "{}/sbc/companion/challenges/images/sbc_challenge_image_{image_id}.png",
            self.ea_base_url
        )
    }
}
