use crate::model::RarityDefinition;
use crate::tier::tier_for_rating;

pub const DEFAULT_SLOT_COLOR: &str = "#ffffff";
pub const PALETTE_SLOTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Header,
    Name,
    AttributeValues,
    Footer,
    PlayStyleIcon,
    PlayStyleText,
    Background,
    Dividers,
}

impl PaletteSlot {
    /// Order in which a rarity's slot indices map onto named fields.
    pub const ALL: [PaletteSlot; PALETTE_SLOTS] = [
        PaletteSlot::Header,
        PaletteSlot::Name,
        PaletteSlot::AttributeValues,
        PaletteSlot::Footer,
        PaletteSlot::PlayStyleIcon,
        PaletteSlot::PlayStyleText,
        PaletteSlot::Background,
        PaletteSlot::Dividers,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    pub header: String,
    pub name: String,
    pub attribute_values: String,
    pub footer: String,
    pub play_style_icon: String,
    pub play_style_text: String,
    pub background: String,
    pub dividers: String,
    pub use_light_crest: u8,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::from_slots(std::array::from_fn(|_| None), 0)
    }
}

impl ColorPalette {
    fn from_slots(slots: [Option<String>; PALETTE_SLOTS], use_light_crest: u8) -> Self {
        let [header, name, attribute_values, footer, play_style_icon, play_style_text, background, dividers] =
            slots.map(|slot| slot.unwrap_or_else(|| DEFAULT_SLOT_COLOR.to_string()));
        Self {
            header,
            name,
            attribute_values,
            footer,
            play_style_icon,
            play_style_text,
            background,
            dividers,
            use_light_crest,
        }
    }

    pub fn get(&self, slot: PaletteSlot) -> &str {
        match slot {
            PaletteSlot::Header => &self.header,
            PaletteSlot::Name => &self.name,
            PaletteSlot::AttributeValues => &self.attribute_values,
            PaletteSlot::Footer => &self.footer,
            PaletteSlot::PlayStyleIcon => &self.play_style_icon,
            PaletteSlot::PlayStyleText => &self.play_style_text,
            PaletteSlot::Background => &self.background,
            PaletteSlot::Dividers => &self.dividers,
        }
    }

    /// RGB triple for a slot; malformed hex falls back to white.
    pub fn rgb(&self, slot: PaletteSlot) -> (u8, u8, u8) {
        parse_hex_rgb(self.get(slot)).unwrap_or((0xff, 0xff, 0xff))
    }
}

/// Normalizes a possibly short hex code (`"fff"`, `"#a0b"`) to `#rrggbb` by
/// left-padding with zeros.
pub fn fill_hex(hex: &str) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    format!("#{digits:0>6}")
}

pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Derives the card palette for a player of `rating` wearing `rarity`.
///
/// `use_light_crest` is 1 only when the ninth slot index is exactly 1.
/// Never fails: a missing rarity, an empty color list or too few slot indices
/// all degrade to white slots.
pub fn compute_palette(rarity: Option<&RarityDefinition>, rating: i64) -> ColorPalette {
    let Some(rarity) = rarity.filter(|r| !r.colors.is_empty()) else {
        return ColorPalette::default();
    };

    let available = available_colors(rarity, rating);
    let indices = &rarity.color_slot_indices;

    let mut slots: [Option<String>; PALETTE_SLOTS] = std::array::from_fn(|_| None);
    if indices.len() >= PALETTE_SLOTS {
        for (slot, &index) in slots.iter_mut().zip(indices.iter()) {
            *slot = resolve_slot(available, index).map(fill_hex);
        }
    }

    let use_light_crest = indices
        .get(PALETTE_SLOTS)
        .map(|flag| u8::from(*flag == 1))
        .unwrap_or(0);

    ColorPalette::from_slots(slots, use_light_crest)
}

/// The slice of `colors` belonging to the tier selected by `rating`.
///
/// Colors that do not divide evenly into `level_count` chunks are dropped.
fn available_colors(rarity: &RarityDefinition, rating: i64) -> &[String] {
    let colors = rarity.colors.as_slice();
    if rarity.level_count == 0 {
        return colors;
    }
    let tier = tier_for_rating(rarity.level_count, rating) as usize;
    let chunk = colors.len() / rarity.level_count as usize;
    let start = ((tier - 1) * chunk).min(colors.len());
    let end = (start + chunk).min(colors.len());
    &colors[start..end]
}

/// Resolves a 1-based slot index, wrapping past the end of `available`.
fn resolve_slot(available: &[String], index: i64) -> Option<&str> {
    if available.is_empty() {
        return None;
    }
    let color_index = usize::try_from(index.checked_sub(1)?).ok()?;
    available
        .get(color_index % available.len())
        .map(String::as_str)
}
