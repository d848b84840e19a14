//! Client configuration.
//!
//! Defaults point at the public film API. `ClientConfig::from_env` lets a
//! developer aim a build at the mock server without recompiling.

use std::time::Duration;

/// Public endpoint the mobile client ships against.
pub const DEFAULT_BASE_URL: &str = "https://ghibliapi.vercel.app";

/// What a successful reload does with favorite ids that vanished from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesPolicy {
    /// Keep them until the user un-favorites. Hidden from `favorites()` while
    /// absent, visible again if the film comes back.
    #[default]
    Retain,
    /// Drop every id not present in the new catalog.
    Prune,
}

/// Configuration for `CatalogClient` and `CatalogSession`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the catalog API, without the `/films` path.
    pub base_url: String,
    /// Upper bound on one fetch, from request start to decoded body.
    pub request_timeout: Duration,
    /// Sent as `User-Agent` by the bundled transport.
    pub user_agent: String,
    pub favorites_policy: FavoritesPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("catalog-core/", env!("CARGO_PKG_VERSION")).to_string(),
            favorites_policy: FavoritesPolicy::Retain,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `CATALOG_BASE_URL`, `CATALOG_TIMEOUT_SECS` and
    /// `CATALOG_PRUNE_FAVORITES`. Unparseable values and a zero timeout are
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("CATALOG_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(secs) = lookup("CATALOG_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("CATALOG_PRUNE_FAVORITES") {
            if matches!(flag.trim(), "1" | "true" | "yes") {
                config.favorites_policy = FavoritesPolicy::Prune;
            }
        }
        config
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.favorites_policy, FavoritesPolicy::Retain);
        assert!(config.user_agent.starts_with("catalog-core/"));
    }

    #[test]
    fn env_overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CATALOG_BASE_URL", "http://127.0.0.1:3000"),
            ("CATALOG_TIMEOUT_SECS", "5"),
            ("CATALOG_PRUNE_FAVORITES", "true"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.favorites_policy, FavoritesPolicy::Prune);
    }

    #[test]
    fn bad_env_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CATALOG_BASE_URL", "  "),
            ("CATALOG_TIMEOUT_SECS", "soon"),
            ("CATALOG_PRUNE_FAVORITES", "0"),
        ]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.favorites_policy, FavoritesPolicy::Retain);
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("CATALOG_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
