//! Key-value configuration sources
//!
//! Settings that can change between requests (SMTP credentials) are read
//! through [`ConfigSource`] at use time rather than captured at startup.

use std::collections::HashMap;

/// String-keyed configuration lookup
pub trait ConfigSource: Send + Sync {
    /// Value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
///
/// The entry point is expected to have loaded `.env` beforehand.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory configuration
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_config_lookup() {
        let config: MapConfig = [("SMTP_SERVER", "smtp.example.com")].into_iter().collect();
        assert_eq!(config.get("SMTP_SERVER").as_deref(), Some("smtp.example.com"));
        assert_eq!(config.get("SMTP_PORT"), None);
    }

    #[test]
    fn without_removes_key() {
        let config = MapConfig::new().with("A", "1").with("B", "2").without("A");
        assert_eq!(config.get("A"), None);
        assert_eq!(config.get("B").as_deref(), Some("2"));
    }

    #[test]
    fn env_config_missing_key() {
        assert_eq!(EnvConfig.get("FOLIO_TEST_DEFINITELY_UNSET_KEY"), None);
    }
}
