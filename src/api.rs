use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{Config, config};
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::{NamedEntity, PlayerRecord, RarityDefinition, SbcSet};
use crate::reference::ReferenceData;
use crate::state::PlayerTab;

pub fn fetch_players(tab: PlayerTab, page: u32) -> Result<Vec<PlayerRecord>> {
    let cfg = config();
    let body = get(cfg, &cfg.api_url(&players_path(tab, page)))?;
    parse_players_json(&body)
}

pub fn search_players(query: &str) -> Result<Vec<PlayerRecord>> {
    let cfg = config();
    let url = search_url(cfg, query)?;
    let body = get(cfg, &url)?;
    parse_players_json(&body)
}

pub fn fetch_sbcs() -> Result<Vec<SbcSet>> {
    let cfg = config();
    let body = get(cfg, &cfg.api_url("/fetch_sbc_data/"))?;
    parse_sbcs_json(&body)
}

/// Fetches nations, leagues, rarities ("promos") and teams.
pub fn fetch_reference_data() -> Result<ReferenceData> {
    let cfg = config();
    let nations = parse_named_json(&get(cfg, &cfg.api_url("/get_nations"))?)
        .context("nations")?;
    let leagues = parse_named_json(&get(cfg, &cfg.api_url("/get_leagues"))?)
        .context("leagues")?;
    let rarities = parse_rarities_json(&get(cfg, &cfg.api_url("/get_promos"))?)
        .context("rarities")?;
    let teams = parse_named_json(&get(cfg, &cfg.api_url("/get_teams"))?).context("teams")?;
    Ok(ReferenceData {
        nations,
        leagues,
        rarities,
        teams,
    })
}

pub fn players_path(tab: PlayerTab, page: u32) -> String {
    match tab {
        PlayerTab::Recent => "/get_latest".to_string(),
        PlayerTab::Trending => "/top_rated/".to_string(),
        PlayerTab::Investment => format!("/investment_players/?page={}", page.max(1)),
    }
}

pub fn search_url(cfg: &Config, query: &str) -> Result<String> {
    let url = Url::parse_with_params(&cfg.api_url("/search/"), &[("name", query)])
        .context("invalid search url")?;
    Ok(url.to_string())
}

pub fn parse_players_json(raw: &str) -> Result<Vec<PlayerRecord>> {
    parse_list_json(raw, "players")
}

pub fn parse_rarities_json(raw: &str) -> Result<Vec<RarityDefinition>> {
    parse_list_json(raw, "rarities")
}

pub fn parse_sbcs_json(raw: &str) -> Result<Vec<SbcSet>> {
    parse_list_json(raw, "sbc")
}

pub fn parse_named_json(raw: &str) -> Result<Vec<NamedEntity>> {
    parse_list_json(raw, "reference")
}

fn get(cfg: &Config, url: &str) -> Result<String> {
    let client = http_client()?;
    fetch_json_cached(client, url, cfg.cache_ttl)
}

/// Accepts a bare array or a `{ "data": [...] }` envelope; entries that do
/// not fit `T` are skipped rather than failing the whole list.
fn parse_list_json<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value =
        serde_json::from_str(trimmed).with_context(|| format!("invalid {what} json"))?;
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(anyhow!("unexpected {what} payload: data is not a list")),
        },
        _ => return Err(anyhow!("unexpected {what} payload")),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .collect())
}
