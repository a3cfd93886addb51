use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

use crate::assets::AssetUrls;
use crate::model::{SbcReward, SbcSet};

/// How many SBCs the home list shows.
pub const SBC_LIST_LIMIT: usize = 9;

const FRESH_WINDOW_HOURS: i64 = 24;
const EXPIRING_WINDOW_HOURS: i64 = 24;

/// Human countdown using the largest non-zero unit.
pub fn time_until_expiration(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = end - now;
    if diff <= Duration::zero() {
        return "Expired".to_string();
    }
    let seconds = diff.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days} days")
    } else if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{seconds} seconds")
    }
}

pub fn expiry_label(sbc: &SbcSet, now: DateTime<Utc>) -> String {
    if sbc.end_time == 0 {
        return "No Expiry".to_string();
    }
    match end_of(sbc) {
        Some(end) => time_until_expiration(end, now),
        None => "Expired".to_string(),
    }
}

pub fn is_expired(sbc: &SbcSet, now: DateTime<Utc>) -> bool {
    sbc.end_time != 0 && end_of(sbc).is_none_or(|end| end <= now)
}

pub fn is_expiring_soon(sbc: &SbcSet, now: DateTime<Utc>) -> bool {
    if sbc.end_time == 0 {
        return false;
    }
    end_of(sbc).is_some_and(|end| end > now && end - now <= Duration::hours(EXPIRING_WINDOW_HOURS))
}

pub fn is_new(sbc: &SbcSet, now: DateTime<Utc>) -> bool {
    sbc.release_time
        .and_then(epoch_to_utc)
        .is_some_and(|released| released <= now && now - released <= Duration::hours(FRESH_WINDOW_HOURS))
}

/// Prefers a pack reward's name, then a player reward's. Empty names count
/// as missing.
pub fn reward_name(sbc: &SbcSet) -> Option<&str> {
    let pack = sbc.rewards.iter().find(|r| r.item_type != "player");
    let player = sbc.rewards.iter().find(|r| r.item_type == "player");
    named(pack).or_else(|| named(player))
}

fn named(reward: Option<&SbcReward>) -> Option<&str> {
    reward
        .and_then(|r| r.name.as_deref())
        .filter(|name| !name.is_empty())
}

/// The set's challenge artwork when it has one, otherwise the generic SBC icon.
pub fn image_url(sbc: &SbcSet, urls: &AssetUrls) -> String {
    match sbc.set_image_id.as_deref().filter(|id| !id.is_empty()) {
        Some(image_id) => urls.challenge_image(image_id),
        None => urls.sbc_icon(&sbc.setid),
    }
}

fn end_of(sbc: &SbcSet) -> Option<DateTime<Utc>> {
    sbc.end_time_stamp.as_deref().and_then(parse_timestamp)
}

/// Parses RFC 3339 or a bare `YYYY-MM-DD[T ]HH:MM[:SS]`, the latter taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let cleaned = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }
    let without_fraction = cleaned.split('.').next().unwrap_or(cleaned);
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(without_fraction, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Release times arrive as epoch seconds or milliseconds.
fn epoch_to_utc(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() >= 100_000_000_000 {
        Utc.timestamp_millis_opt(raw).single()
    } else {
        Utc.timestamp_opt(raw, 0).single()
    }
}
