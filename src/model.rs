//! Typed shapes for the companion API payloads.
//!
//! The backend is loose about types (ids arrive as numbers or strings, arrays
//! are sometimes `null`), so the deserializers here coerce instead of failing.
//! Everything past this module only sees the strongly typed structs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fallback for a color entry that is not a string.
const FALLBACK_COLOR: &str = "ffffff";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityDefinition {
    #[serde(deserialize_with = "lenient_u32")]
    pub id: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_colors")]
    pub colors: Vec<String>,
    #[serde(rename = "lg_color_indices", deserialize_with = "lenient_indices")]
    pub color_slot_indices: Vec<i64>,
    #[serde(rename = "levels", deserialize_with = "lenient_u32")]
    pub level_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub base_id: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub c_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub rating: i64,
    #[serde(deserialize_with = "lenient_strings")]
    pub position: Vec<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub nation: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub leagueid: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub teamid: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub rarity: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub rarity_name: String,
    #[serde(deserialize_with = "lenient_i64s")]
    pub attributes: Vec<i64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub skill_moves: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub weak_foot: i64,
    #[serde(deserialize_with = "lenient_u32s")]
    pub playstyles: Vec<u32>,
    #[serde(deserialize_with = "lenient_u32s")]
    pub playstyle_plus: Vec<u32>,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub latest_price: Option<i64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub trend: Option<String>,
}

/// Nations, leagues and teams all share this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedEntity {
    #[serde(deserialize_with = "lenient_u32")]
    pub id: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
}

pub type Nation = NamedEntity;
pub type League = NamedEntity;
pub type Team = NamedEntity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SbcSet {
    #[serde(deserialize_with = "lenient_string")]
    pub setid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(rename = "challengesCount", deserialize_with = "lenient_i64")]
    pub challenges_count: i64,
    #[serde(rename = "setImageId", deserialize_with = "lenient_opt_string")]
    pub set_image_id: Option<String>,
    #[serde(rename = "endTimeStamp", deserialize_with = "lenient_opt_string")]
    pub end_time_stamp: Option<String>,
    #[serde(rename = "endTime", deserialize_with = "lenient_i64")]
    pub end_time: i64,
    #[serde(rename = "totalCost", deserialize_with = "lenient_opt_i64")]
    pub total_cost: Option<i64>,
    #[serde(deserialize_with = "lenient_rewards")]
    pub rewards: Vec<SbcReward>,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub repeatability: Option<i64>,
    #[serde(rename = "releaseTime", deserialize_with = "lenient_opt_i64")]
    pub release_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SbcReward {
    #[serde(rename = "itemType", deserialize_with = "lenient_string")]
    pub item_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn value_as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(value_as_string(Value::deserialize(de)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(value_as_string(Value::deserialize(de)?))
}

fn lenient_i64<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    Ok(value_as_i64(&Value::deserialize(de)?).unwrap_or_default())
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(value_as_i64(&Value::deserialize(de)?))
}

fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let raw = value_as_i64(&Value::deserialize(de)?).unwrap_or_default();
    Ok(u32::try_from(raw).unwrap_or_default())
}

fn lenient_u64<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    let raw = value_as_i64(&Value::deserialize(de)?).unwrap_or_default();
    Ok(u64::try_from(raw).unwrap_or_default())
}

fn array_items<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<Value>, D::Error> {
    match Value::deserialize(de)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Keeps positions stable: a non-string entry becomes white instead of
/// being dropped, so 1-based slot indices still line up.
fn lenient_colors<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(array_items(de)?
        .into_iter()
        .map(|item| value_as_string(item).unwrap_or_else(|| FALLBACK_COLOR.to_string()))
        .collect())
}

fn lenient_strings<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(array_items(de)?
        .into_iter()
        .filter_map(value_as_string)
        .collect())
}

/// Slot indices: `null` entries collapse to 0, which never resolves to a color.
fn lenient_indices<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<i64>, D::Error> {
    Ok(array_items(de)?
        .iter()
        .map(|item| value_as_i64(item).unwrap_or_default())
        .collect())
}

fn lenient_i64s<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<i64>, D::Error> {
    Ok(array_items(de)?.iter().filter_map(value_as_i64).collect())
}

fn lenient_u32s<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u32>, D::Error> {
    Ok(array_items(de)?
        .iter()
        .filter_map(value_as_i64)
        .filter_map(|v| u32::try_from(v).ok())
        .collect())
}

fn lenient_rewards<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<SbcReward>, D::Error> {
    Ok(array_items(de)?
        .into_iter()
        .filter_map(|item| serde_json::from_value::<SbcReward>(item).ok())
        .collect())
}
