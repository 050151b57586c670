//! Shared credentials file (`~/.aws/credentials`)
//!
//! The resolver only hands out [`Credentials::SharedFile`] references. Callers
//! that need the key material itself (to sign requests without an SDK, or to
//! check a profile exists) read it through [`SharedCredentialsFile`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::credentials::{Credentials, StaticCredentials};
use crate::env::{EnvSource, AWS_PROFILE, AWS_SHARED_CREDENTIALS_FILE};
use crate::error::{ResolveError, ResolveResult};
use crate::profiles::{ini, DEFAULT_PROFILE};

const ACCESS_KEY_ID: &str = "aws_access_key_id";
const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
const SESSION_TOKEN: &str = "aws_session_token";

/// Reader for the provider-standard credentials file
///
/// Section names are bare profile names (`[default]`, `[prod]`).
///
/// # Example
///
/// ```no_run
/// use awsecrets_core::env::ProcessEnv;
/// use awsecrets_core::shared::SharedCredentialsFile;
/// use awsecrets_core::Credentials;
///
/// let file = SharedCredentialsFile::from_env(&ProcessEnv::new());
/// let keys = file.materialize(&Credentials::shared("prod")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SharedCredentialsFile {
    path: Option<PathBuf>,
    default_profile: String,
}

impl SharedCredentialsFile {
    /// Create a reader for a specific file; unnamed references use `default`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            default_profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Create a reader for the file the environment points at
    ///
    /// Unnamed references use `AWS_PROFILE`, falling back to `default`.
    pub fn from_env(env: &dyn EnvSource) -> Self {
        Self {
            path: ini::default_location(env, AWS_SHARED_CREDENTIALS_FILE, "credentials"),
            default_profile: env
                .get(AWS_PROFILE)
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
        }
    }

    /// Override the profile used for references without a profile name
    pub fn with_default_profile(mut self, profile: impl Into<String>) -> Self {
        self.default_profile = profile.into();
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn default_profile(&self) -> &str {
        &self.default_profile
    }

    /// Parse the file into profile name -> settings
    pub fn load(&self) -> ResolveResult<HashMap<String, BTreeMap<String, String>>> {
        let Some(path) = &self.path else {
            return Ok(HashMap::new());
        };

        let mut profiles: HashMap<String, BTreeMap<String, String>> = HashMap::new();
        for section in ini::read(path)? {
            profiles
                .entry(section.header)
                .or_default()
                .extend(section.settings);
        }
        Ok(profiles)
    }

    /// Key pair stored under `profile`
    pub fn credentials_for(&self, profile: &str) -> ResolveResult<StaticCredentials> {
        let profiles = self.load()?;
        let settings = profiles
            .get(profile)
            .ok_or_else(|| ResolveError::ProfileNotFound(profile.to_string()))?;

        let value = |key: &'static str| {
            settings
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
        };
        let access_key_id = value(ACCESS_KEY_ID)
            .ok_or_else(|| ResolveError::incomplete_profile(profile, ACCESS_KEY_ID))?;
        let secret_access_key = value(SECRET_ACCESS_KEY)
            .ok_or_else(|| ResolveError::incomplete_profile(profile, SECRET_ACCESS_KEY))?;

        let keys = StaticCredentials::new(access_key_id, secret_access_key);
        Ok(match value(SESSION_TOKEN) {
            Some(token) => keys.with_session_token(token),
            None => keys,
        })
    }

    /// Turn a resolved credential into key material where that is possible offline
    ///
    /// Returns `Ok(None)` for instance-role credentials, which need the
    /// metadata service.
    pub fn materialize(&self, credentials: &Credentials) -> ResolveResult<Option<StaticCredentials>> {
        match credentials {
            Credentials::InstanceRole => Ok(None),
            Credentials::Static(keys) => Ok(Some(keys.clone())),
            Credentials::SharedFile { profile } => {
                let profile = profile.as_deref().unwrap_or(&self.default_profile);
                self.credentials_for(profile).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;
    use std::fs;
    use tempfile::tempdir;

    const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIDDEFAULT
aws_secret_access_key = default-secret

[prod]
aws_access_key_id = AKIDPROD
aws_secret_access_key = prod-secret
aws_session_token = prod-token

[broken]
aws_access_key_id = AKIDBROKEN
";

    fn write_credentials() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, CREDENTIALS).unwrap();
        (dir, path)
    }

    #[test]
    fn test_credentials_for_profile() {
        let (_dir, path) = write_credentials();
        let file = SharedCredentialsFile::new(&path);

        let prod = file.credentials_for("prod").unwrap();
        assert_eq!(prod.access_key_id(), "AKIDPROD");
        assert_eq!(prod.secret_access_key(), "prod-secret");
        assert_eq!(prod.session_token(), Some("prod-token"));

        let default = file.credentials_for("default").unwrap();
        assert_eq!(default.session_token(), None);
    }

    #[test]
    fn test_missing_and_incomplete_profiles() {
        let (_dir, path) = write_credentials();
        let file = SharedCredentialsFile::new(&path);

        assert!(matches!(
            file.credentials_for("nope"),
            Err(ResolveError::ProfileNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            file.credentials_for("broken"),
            Err(ResolveError::IncompleteProfile { key: "aws_secret_access_key", .. })
        ));
    }

    #[test]
    fn test_materialize_references() {
        let (_dir, path) = write_credentials();
        let file = SharedCredentialsFile::new(&path);

        let keys = file.materialize(&Credentials::shared("prod")).unwrap().unwrap();
        assert_eq!(keys.access_key_id(), "AKIDPROD");

        let keys = file.materialize(&Credentials::shared_default()).unwrap().unwrap();
        assert_eq!(keys.access_key_id(), "AKIDDEFAULT");

        assert!(file.materialize(&Credentials::InstanceRole).unwrap().is_none());

        let literal = Credentials::from_keys("AKIDLITERAL", "s", None);
        let keys = file.materialize(&literal).unwrap().unwrap();
        assert_eq!(keys.access_key_id(), "AKIDLITERAL");
    }

    #[test]
    fn test_from_env_uses_aws_profile() {
        let (_dir, path) = write_credentials();
        let env = MemoryEnv::new()
            .with_var("AWS_SHARED_CREDENTIALS_FILE", path.to_string_lossy())
            .with_var("AWS_PROFILE", "prod");

        let file = SharedCredentialsFile::from_env(&env);
        assert_eq!(file.path(), Some(path.as_path()));
        assert_eq!(file.default_profile(), "prod");

        let keys = file.materialize(&Credentials::shared_default()).unwrap().unwrap();
        assert_eq!(keys.access_key_id(), "AKIDPROD");
    }

    #[test]
    fn test_missing_file_means_missing_profile() {
        let dir = tempdir().unwrap();
        let file = SharedCredentialsFile::new(dir.path().join("credentials"));
        assert!(file.load().unwrap().is_empty());
        assert!(matches!(
            file.credentials_for("default"),
            Err(ResolveError::ProfileNotFound(_))
        ));
    }
}
