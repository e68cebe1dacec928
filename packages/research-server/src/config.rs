use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use wiki_research::WikiConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub wiki: WikiConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut wiki = WikiConfig::default();

        if let Some(base_url) = lookup("WIKI_BASE_URL") {
            wiki = wiki.with_base_url(base_url);
        }
        if let Some(api_url) = lookup("WIKI_API_URL") {
            wiki = wiki.with_api_url(api_url);
        }
        if let Some(user_agent) = lookup("WIKI_USER_AGENT") {
            wiki = wiki.with_user_agent(user_agent);
        }
        if let Some(secs) = lookup("WIKI_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("WIKI_TIMEOUT_SECS must be a whole number of seconds")?;
            wiki = wiki.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = lookup("WIKI_MAX_CONCURRENCY") {
            let max: usize = max
                .parse()
                .context("WIKI_MAX_CONCURRENCY must be a valid number")?;
            wiki = wiki.with_max_concurrency(max);
        }

        wiki.validate().context("Invalid wiki configuration")?;

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            wiki,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.wiki.base_url, "https://en.wikipedia.org");
        assert_eq!(config.wiki.max_concurrency, 8);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("WIKI_BASE_URL", "http://localhost:9000/"),
            ("WIKI_TIMEOUT_SECS", "4"),
            ("WIKI_MAX_CONCURRENCY", "2"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.wiki.base_url, "http://localhost:9000");
        assert_eq!(config.wiki.request_timeout, Duration::from_secs(4));
        assert_eq!(config.wiki.max_concurrency, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("WIKI_MAX_CONCURRENCY", "0")])).is_err());
    }
}
