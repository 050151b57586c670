//! Result of a resolve call

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::{ResolveError, ResolveResult};

/// The stage that supplied a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Passed in `ResolveOptions`
    Options,
    InstanceRole,
    /// Profile passed in `ResolveOptions`
    ExplicitProfile,
    CommandLine,
    Environment,
    SecretsFile,
    SharedCredentialsFile,
    ConfigFile,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Options => "options",
            Source::InstanceRole => "instance_role",
            Source::ExplicitProfile => "explicit_profile",
            Source::CommandLine => "command_line",
            Source::Environment => "environment",
            Source::SecretsFile => "secrets_file",
            Source::SharedCredentialsFile => "shared_credentials_file",
            Source::ConfigFile => "config_file",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region and credentials after the whole chain has run
///
/// Either field may still be empty; use [`require_region`](Self::require_region)
/// and [`require_credentials`](Self::require_credentials) when both are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub region: Option<String>,
    pub credentials: Option<Credentials>,
    /// Profile name in effect at the end of the chain
    pub profile: Option<String>,
    /// Where `region` came from
    pub region_source: Option<Source>,
    /// Where `credentials` came from
    pub credentials_source: Option<Source>,
    /// Secrets file the chain looked at
    pub secrets_path: PathBuf,
}

impl Resolution {
    pub fn require_region(&self) -> ResolveResult<&str> {
        self.region.as_deref().ok_or(ResolveError::MissingRegion)
    }

    pub fn require_credentials(&self) -> ResolveResult<&Credentials> {
        self.credentials.as_ref().ok_or(ResolveError::MissingCredentials)
    }

    /// Split into the `(region, credentials)` pair
    pub fn into_pair(self) -> (Option<String>, Option<Credentials>) {
        (self.region, self.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Resolution {
        Resolution {
            region: None,
            credentials: None,
            profile: None,
            region_source: None,
            credentials_source: None,
            secrets_path: PathBuf::from("secrets.yml"),
        }
    }

    #[test]
    fn test_require_missing_fields() {
        let resolution = empty();
        assert!(matches!(resolution.require_region(), Err(ResolveError::MissingRegion)));
        assert!(matches!(
            resolution.require_credentials(),
            Err(ResolveError::MissingCredentials)
        ));
    }

    #[test]
    fn test_require_present_fields() {
        let resolution = Resolution {
            region: Some("us-east-1".to_string()),
            credentials: Some(Credentials::InstanceRole),
            ..empty()
        };
        assert_eq!(resolution.require_region().unwrap(), "us-east-1");
        assert_eq!(resolution.require_credentials().unwrap(), &Credentials::InstanceRole);

        let (region, credentials) = resolution.into_pair();
        assert_eq!(region.as_deref(), Some("us-east-1"));
        assert_eq!(credentials, Some(Credentials::InstanceRole));
    }

    #[test]
    fn test_source_names() {
        assert_eq!(Source::CommandLine.to_string(), "command_line");
        assert_eq!(Source::SharedCredentialsFile.as_str(), "shared_credentials_file");
    }
}
