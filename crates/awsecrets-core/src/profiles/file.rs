//! Profile store backed by the CLI-style config file
//!
//! Reads `~/.aws/config` (or the file named by `AWS_CONFIG_FILE`). Profile
//! sections are `[default]` and `[profile NAME]`; a bare `[NAME]` is accepted
//! as well. Other typed sections such as `[sso-session NAME]` are skipped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::env::{EnvSource, AWS_CONFIG_FILE};
use crate::error::ResolveResult;
use super::ini;
use super::traits::{ProfileStore, ProfileConfig};

/// File-based profile store
///
/// The file is parsed on first lookup and cached for the lifetime of the
/// store. A missing or unreadable file behaves as an empty store.
///
/// # Example
///
/// ```no_run
/// use awsecrets_core::env::ProcessEnv;
/// use awsecrets_core::profiles::{FileProfileStore, ProfileStore};
///
/// let store = FileProfileStore::from_env(&ProcessEnv::new());
/// let region = store.region_of("default");
/// ```
pub struct FileProfileStore {
    path: Option<PathBuf>,
    profiles: OnceCell<HashMap<String, ProfileConfig>>,
}

impl FileProfileStore {
    /// Create a store for a specific config file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            profiles: OnceCell::new(),
        }
    }

    /// Create a store for the config file the environment points at
    ///
    /// With neither `AWS_CONFIG_FILE` nor a home directory the store is empty.
    pub fn from_env(env: &dyn EnvSource) -> Self {
        Self {
            path: ini::default_location(env, AWS_CONFIG_FILE, "config"),
            profiles: OnceCell::new(),
        }
    }

    /// Get the config file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parse the config file, bypassing the cache
    ///
    /// A missing file yields no profiles; other IO failures are returned.
    pub fn load(&self) -> ResolveResult<HashMap<String, ProfileConfig>> {
        let Some(path) = &self.path else {
            return Ok(HashMap::new());
        };

        let mut profiles: HashMap<String, ProfileConfig> = HashMap::new();
        for section in ini::read(path)? {
            let Some(name) = profile_name(&section.header) else {
                continue;
            };
            profiles
                .entry(name.to_string())
                .or_default()
                .settings
                .extend(section.settings);
        }
        Ok(profiles)
    }

    fn profiles(&self) -> &HashMap<String, ProfileConfig> {
        self.profiles
            .get_or_init(|| self.load().unwrap_or_default())
    }
}

/// Map a section header to the profile it names
fn profile_name(header: &str) -> Option<&str> {
    if let Some(name) = header.strip_prefix("profile ") {
        let name = name.trim();
        return (!name.is_empty()).then_some(name);
    }
    if header.contains(char::is_whitespace) {
        return None;
    }
    Some(header)
}

impl std::fmt::Debug for FileProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileProfileStore")
            .field("path", &self.path)
            .field("loaded", &self.profiles.get().is_some())
            .finish()
    }
}

impl ProfileStore for FileProfileStore {
    fn name(&self) -> &str {
        "config-file"
    }

    fn lookup(&self, profile: &str) -> Option<ProfileConfig> {
        self.profiles().get(profile).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = "\
[default]
region = us-east-1

[profile prod]
region = us-west-2
output = json

[profile norole]
output = text

[sso-session corp]
sso_region = eu-west-1
";

    #[test]
    fn test_file_profile_store_lookup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, CONFIG).unwrap();

        let store = FileProfileStore::new(&path);
        assert_eq!(store.region_of("default"), Some("us-east-1".to_string()));
        assert_eq!(store.region_of("prod"), Some("us-west-2".to_string()));
        assert_eq!(store.lookup("prod").unwrap().get("output"), Some("json"));

        // Profile exists without a region
        assert!(store.has("norole"));
        assert_eq!(store.region_of("norole"), None);

        // Typed non-profile sections are not profiles
        assert!(!store.has("sso-session corp"));
        assert!(!store.has("corp"));
    }

    #[test]
    fn test_file_profile_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileProfileStore::new(dir.path().join("nope"));
        assert!(store.lookup("default").is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_profile_store_caches_first_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "[default]\nregion = us-east-1\n").unwrap();

        let store = FileProfileStore::new(&path);
        assert_eq!(store.region_of("default"), Some("us-east-1".to_string()));

        fs::write(&path, "[default]\nregion = eu-north-1\n").unwrap();
        assert_eq!(store.region_of("default"), Some("us-east-1".to_string()));
        // load() always reads the file
        assert_eq!(
            store.load().unwrap().get("default").unwrap().region(),
            Some("eu-north-1")
        );
    }

    #[test]
    fn test_file_profile_store_from_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom-config");
        fs::write(&path, "[profile staging]\nregion = ca-central-1\n").unwrap();

        let env = MemoryEnv::new().with_var("AWS_CONFIG_FILE", path.to_string_lossy());
        let store = FileProfileStore::from_env(&env);
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(store.region_of("staging"), Some("ca-central-1".to_string()));
    }

    #[test]
    fn test_duplicate_sections_merge() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(
            &path,
            "[profile a]\noutput = json\n[profile a]\nregion = sa-east-1\n",
        )
        .unwrap();

        let store = FileProfileStore::new(&path);
        let a = store.lookup("a").unwrap();
        assert_eq!(a.region(), Some("sa-east-1"));
        assert_eq!(a.get("output"), Some("json"));
    }
}
