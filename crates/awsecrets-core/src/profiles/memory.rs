//! In-memory profile store

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::traits::{ProfileStore, ProfileConfig};

/// In-memory profile store for testing and hosts that manage profiles themselves
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, ProfileConfig>>,
}

impl MemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile
    pub fn insert(&self, name: impl Into<String>, config: ProfileConfig) {
        let mut guard = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(name.into(), config);
    }

    pub fn len(&self) -> usize {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileStore for MemoryProfileStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn lookup(&self, profile: &str) -> Option<ProfileConfig> {
        let guard = self.profiles.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(profile).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lookup() {
        let store = MemoryProfileStore::new();
        assert!(store.is_empty());

        store.insert("prod", ProfileConfig::new().with_region("us-west-2"));
        assert_eq!(store.len(), 1);
        assert!(store.has("prod"));
        assert!(!store.has("dev"));
        assert_eq!(store.region_of("prod"), Some("us-west-2".to_string()));
    }

    #[test]
    fn test_memory_store_profile_without_region() {
        let store = MemoryProfileStore::new();
        store.insert("bare", ProfileConfig::new());
        assert!(store.has("bare"));
        assert_eq!(store.region_of("bare"), None);
    }
}
