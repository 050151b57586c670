//! Profile store trait and profile type

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Profile consulted when no other profile name is known
pub const DEFAULT_PROFILE: &str = "default";

/// Settings of one named profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Raw `key = value` settings of the profile
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl ProfileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region
    pub fn with_region(self, region: impl Into<String>) -> Self {
        self.with_setting("region", region)
    }

    /// Set an arbitrary setting
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Region configured for this profile, if any
    pub fn region(&self) -> Option<&str> {
        self.get("region")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Lookup of named profiles
///
/// An unknown profile name is not an error; `lookup` returns `None`.
///
/// # Example
///
/// ```
/// use awsecrets_core::profiles::{ProfileStore, ProfileConfig, MemoryProfileStore};
///
/// let store = MemoryProfileStore::new();
/// store.insert("prod", ProfileConfig::new().with_region("us-west-2"));
///
/// let prod = store.lookup("prod").unwrap();
/// assert_eq!(prod.region(), Some("us-west-2"));
/// ```
pub trait ProfileStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Find a profile by name
    fn lookup(&self, profile: &str) -> Option<ProfileConfig>;

    /// Check if a profile exists
    fn has(&self, profile: &str) -> bool {
        self.lookup(profile).is_some()
    }

    /// Region of a profile, if the profile exists and sets one
    fn region_of(&self, profile: &str) -> Option<String> {
        self.lookup(profile)
            .and_then(|config| config.region().map(str::to_string))
    }
}

/// Type alias for an Arc-wrapped profile store
pub type SharedProfileStore = Arc<dyn ProfileStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_config_region() {
        let config = ProfileConfig::new().with_region("eu-west-1");
        assert_eq!(config.region(), Some("eu-west-1"));

        let config = ProfileConfig::new().with_setting("output", "json");
        assert_eq!(config.region(), None);
        assert_eq!(config.get("output"), Some("json"));
    }

    #[test]
    fn test_empty_region_is_unset() {
        let config = ProfileConfig::new().with_region("");
        assert_eq!(config.region(), None);
    }
}
