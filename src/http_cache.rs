use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{
    ACCEPT, ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "futcard_terminal";
const CACHE_FILE: &str = "http_cache.json";
const CACHE_MAX_ENTRIES: usize = 256;

static CACHE: Mutex<Option<HttpCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HttpCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// GETs `url`, serving a cached body while it is younger than `ttl` and
/// revalidating with ETag / Last-Modified once it is not.
pub fn fetch_json_cached(client: &Client, url: &str, ttl: Duration) -> Result<String> {
    let now = system_time_to_secs(SystemTime::now()).unwrap_or_default();
    let cached_entry = lookup_entry(url);

    if let Some(entry) = cached_entry.as_ref()
        && is_fresh(entry.fetched_at, now, ttl)
    {
        return Ok(entry.body.clone());
    }

    let mut req = client.get(url).header(ACCEPT, "application/json");
    if let Some(entry) = cached_entry.as_ref() {
        if let Some(etag) = entry.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = entry.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    let resp = req.send().with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    let headers = resp.headers().clone();
    if status == StatusCode::NOT_MODIFIED {
        let Some(mut entry) = cached_entry else {
            return Err(anyhow!("received 304 without cache body"));
        };
        entry.fetched_at = now;
        let body = entry.body.clone();
        store_entry(url, entry);
        return Ok(body);
    }

    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, truncate(&body, 200)));
    }

    let header_string = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    store_entry(
        url,
        CacheEntry {
            body: body.clone(),
            etag: header_string(ETAG),
            last_modified: header_string(LAST_MODIFIED),
            fetched_at: now,
        },
    );
    Ok(body)
}

/// Drops every cached response, in memory and on disk.
pub fn clear_cache() -> Result<()> {
    let mut guard = CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(HttpCacheFile {
        version: CACHE_VERSION,
        entries: HashMap::new(),
    });
    if let Some(path) = cache_path()
        && path.exists()
    {
        fs::remove_file(&path).context("remove http cache")?;
    }
    Ok(())
}

fn is_fresh(fetched_at: u64, now: u64, ttl: Duration) -> bool {
    !ttl.is_zero() && now.saturating_sub(fetched_at) < ttl.as_secs()
}

fn lookup_entry(key: &str) -> Option<CacheEntry> {
    let mut guard = CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.entries.get(key).cloned()
}

fn store_entry(key: &str, entry: CacheEntry) {
    let mut guard = CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.entries.insert(key.to_string(), entry);
    prune_oldest(&mut cache.entries, CACHE_MAX_ENTRIES);
    let _ = save_cache_file(cache);
}

fn prune_oldest(entries: &mut HashMap<String, CacheEntry>, max: usize) {
    if entries.len() <= max {
        return;
    }
    let mut by_age: Vec<(u64, String)> = entries
        .iter()
        .map(|(key, entry)| (entry.fetched_at, key.clone()))
        .collect();
    by_age.sort();
    let excess = entries.len() - max;
    for (_, key) in by_age.into_iter().take(excess) {
        entries.remove(&key);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn load_cache_file() -> HttpCacheFile {
    let Some(path) = cache_path() else {
        return HttpCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return HttpCacheFile::default();
    };
    let cache = serde_json::from_str::<HttpCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return HttpCacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &HttpCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).ok();
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize http cache")?;
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, &path).context("swap http cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR).join(CACHE_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fetched_at: u64) -> CacheEntry {
        CacheEntry {
            body: String::new(),
            etag: None,
            last_modified: None,
            fetched_at,
        }
    }

    #[test]
    fn freshness_window() {
        let ttl = Duration::from_secs(60);
        assert!(is_fresh(1_000, 1_059, ttl));
        assert!(!is_fresh(1_000, 1_060, ttl));
        assert!(!is_fresh(1_000, 1_000, Duration::ZERO));
    }

    #[test]
    fn prune_keeps_newest() {
        let mut entries = HashMap::new();
        entries.insert("a".to_string(), entry(1));
        entries.insert("b".to_string(), entry(3));
        entries.insert("c".to_string(), entry(2));
        prune_oldest(&mut entries, 2);
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains_key("a"));
    }
}
