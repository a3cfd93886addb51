use std::env;
use std::time::Duration;

use once_cell::sync::OnceCell;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_CDN_URL: &str = "https://cdn.futcard.local";
const DEFAULT_EA_URL: &str = "https://www.ea.com/ea-sports-fc/ultimate-team/web-app/content";

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub cdn_base_url: String,
    pub ea_base_url: String,
    pub search_debounce: Duration,
    pub search_min_chars: usize,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            cdn_base_url: DEFAULT_CDN_URL.to_string(),
            ea_base_url: DEFAULT_EA_URL.to_string(),
            search_debounce: Duration::from_millis(400),
            search_min_chars: 2,
            cache_ttl: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let search_debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(400)
            .clamp(50, 5000);
        let search_min_chars = env::var("SEARCH_MIN_CHARS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(2)
            .clamp(1, 10);
        let cache_ttl_secs = env::var("HTTP_CACHE_TTL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(60);
        Self {
            api_base_url: url_env("FUTCARD_API_URL").unwrap_or(defaults.api_base_url),
            cdn_base_url: url_env("FUTCARD_CDN_URL").unwrap_or(defaults.cdn_base_url),
            ea_base_url: url_env("FUTCARD_EA_URL").unwrap_or(defaults.ea_base_url),
            search_debounce: Duration::from_millis(search_debounce_ms),
            search_min_chars,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

/// Resolved once per process; later env changes are not observed.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

fn url_env(key: &str) -> Option<String> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
