//! Per-call resolution options

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Inputs to one resolve call
///
/// Every field is optional. An empty string counts as absent.
///
/// # Example
///
/// ```
/// use awsecrets_core::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .with_region("us-west-2")
///     .with_secrets_path("config/secrets.yml")
///     .with_argv(["--profile", "prod"]);
/// assert_eq!(options.region.as_deref(), Some("us-west-2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Profile selected by the caller; disables command-line scanning
    pub profile: Option<String>,
    /// Region selected by the caller; wins over every other source
    pub region: Option<String>,
    /// Local secrets file; `--secrets_path` or `secrets.yml` when unset
    pub secrets_path: Option<PathBuf>,
    /// Tokens to scan for flags; the process arguments when unset
    pub argv: Option<Vec<String>>,
    /// Seed instance-role credentials before any other source is read
    pub instance_role: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            profile: None,
            region: None,
            secrets_path: None,
            argv: None,
            instance_role: true,
        }
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a named profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Fix the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Read the local secrets file from `path`
    pub fn with_secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = Some(path.into());
        self
    }

    /// Scan these tokens instead of the process arguments
    pub fn with_argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    /// Skip the instance-role stage
    ///
    /// By default instance-role credentials are seeded first, which leaves
    /// only an explicitly selected profile able to replace them. Without the
    /// seed, credentials come from the environment, the secrets file, or the
    /// shared credentials file, in that order.
    pub fn without_instance_role(mut self) -> Self {
        self.instance_role = false;
        self
    }

    pub(crate) fn profile(&self) -> Option<&str> {
        self.profile.as_deref().filter(|p| !p.is_empty())
    }

    pub(crate) fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    pub(crate) fn secrets_path(&self) -> Option<&PathBuf> {
        self.secrets_path
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}
