use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Which backend renders pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Headless Chrome, executes the site's JavaScript
    Browser,
    /// Plain HTTP GET, only for pages that need no rendering
    Http,
}

impl FromStr for FetcherKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" | "chrome" => Ok(Self::Browser),
            "http" => Ok(Self::Http),
            other => bail!("unknown fetcher {other:?}, expected 'browser' or 'http'"),
        }
    }
}

/// Crawl settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// First page of the athlete listing; next-page links resolve against it
    pub listing_url: Url,
    /// Site root; athlete profile links resolve against it
    pub site_url: Url,
    pub fetcher: FetcherKind,
    /// Maximum number of pages in flight
    pub workers: usize,
    /// Time given to client-side scripts after navigation
    pub render_wait: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub output_path: PathBuf,
    /// Directory receiving one JSON file per athlete
    pub raw_dir: PathBuf,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            listing_url: Url::parse("https://www.ufc.com/athletes/all").expect("default listing url"),
            site_url: Url::parse("https://www.ufc.com").expect("default site url"),
            fetcher: FetcherKind::Browser,
            workers: 4,
            render_wait: Duration::from_millis(3000),
            request_timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            output_path: PathBuf::from("scraped_athletes.json"),
            raw_dir: PathBuf::from("raw_scrape"),
        }
    }
}

impl ScoutConfig {
    /// Defaults overridden by `SCOUT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("SCOUT_LISTING_URL") {
            config.listing_url = Url::parse(&v).context("SCOUT_LISTING_URL is not a valid URL")?;
        }
        if let Some(v) = lookup("SCOUT_SITE_URL") {
            config.site_url = Url::parse(&v).context("SCOUT_SITE_URL is not a valid URL")?;
        }
        if let Some(v) = lookup("SCOUT_FETCHER") {
            config.fetcher = v.parse().context("SCOUT_FETCHER")?;
        }
        if let Some(v) = lookup("SCOUT_WORKERS") {
            config.workers = v.parse().context("SCOUT_WORKERS must be a positive integer")?;
            if config.workers == 0 {
                bail!("SCOUT_WORKERS must be at least 1");
            }
        }
        if let Some(v) = lookup("SCOUT_RENDER_WAIT_MS") {
            let ms = v.parse().context("SCOUT_RENDER_WAIT_MS must be milliseconds")?;
            config.render_wait = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("SCOUT_TIMEOUT_SECS") {
            let secs = v.parse().context("SCOUT_TIMEOUT_SECS must be seconds")?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("SCOUT_OUTPUT") {
            config.output_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("SCOUT_RAW_DIR") {
            config.raw_dir = PathBuf::from(v);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ScoutConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listing_url.as_str(), "https://www.ufc.com/athletes/all");
        assert_eq!(config.fetcher, FetcherKind::Browser);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn env_overrides() {
        let config = ScoutConfig::from_lookup(lookup(&[
            ("SCOUT_LISTING_URL", "http://localhost:8080/athletes/all"),
            ("SCOUT_FETCHER", "HTTP"),
            ("SCOUT_WORKERS", "8"),
            ("SCOUT_RENDER_WAIT_MS", "250"),
            ("SCOUT_RAW_DIR", "out/raw"),
        ]))
        .unwrap();
        assert_eq!(config.listing_url.host_str(), Some("localhost"));
        assert_eq!(config.fetcher, FetcherKind::Http);
        assert_eq!(config.workers, 8);
        assert_eq!(config.render_wait, Duration::from_millis(250));
        assert_eq!(config.raw_dir, PathBuf::from("out/raw"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_WORKERS", "0")])).is_err());
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_WORKERS", "many")])).is_err());
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_FETCHER", "curl")])).is_err());
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_SITE_URL", "not a url")])).is_err());
    }
}
