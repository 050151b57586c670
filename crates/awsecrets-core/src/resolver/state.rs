//! Mutable state threaded through the strategy chain

use std::path::PathBuf;

use crate::credentials::Credentials;
use super::options::ResolveOptions;
use super::resolution::{Resolution, Source};

/// State of one resolve call
///
/// Created at the start of the call, mutated by each strategy in turn, and
/// turned into a [`Resolution`] at the end. `region` and `credentials` are
/// first-writer-wins; only [`override_credentials`](Self::override_credentials)
/// replaces a value that is already set.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolutionState {
    /// Profile name in play. Written by the explicit-profile, command-line and
    /// environment stages; read by the config-file stage.
    pub profile: Option<String>,
    /// Whether the caller supplied `profile`; the command-line stage only runs
    /// when this is false
    pub explicit_profile: bool,
    pub region: Option<String>,
    pub region_source: Option<Source>,
    pub credentials: Option<Credentials>,
    pub credentials_source: Option<Source>,
    /// Written by the command-line stage, read by the secrets-file stage
    pub secrets_path: Option<PathBuf>,
}

impl ResolutionState {
    pub fn from_options(options: &ResolveOptions) -> Self {
        let mut state = Self {
            profile: options.profile().map(str::to_string),
            explicit_profile: options.profile().is_some(),
            secrets_path: options.secrets_path().cloned(),
            ..Self::default()
        };
        state.set_region(options.region().map(str::to_string), Source::Options);
        state
    }

    /// Adopt `region` unless one is already set; returns whether it was adopted
    pub fn set_region(&mut self, region: Option<String>, source: Source) -> bool {
        match region.filter(|r| !r.is_empty()) {
            Some(region) if self.region.is_none() => {
                self.region = Some(region);
                self.region_source = Some(source);
                true
            }
            _ => false,
        }
    }

    /// Adopt `credentials` unless some are already set
    pub fn set_credentials(&mut self, credentials: Credentials, source: Source) -> bool {
        if self.credentials.is_some() {
            return false;
        }
        self.credentials = Some(credentials);
        self.credentials_source = Some(source);
        true
    }

    /// Replace whatever credentials are set
    pub fn override_credentials(&mut self, credentials: Credentials, source: Source) {
        self.credentials = Some(credentials);
        self.credentials_source = Some(source);
    }

    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn into_resolution(self, secrets_path: PathBuf) -> Resolution {
        Resolution {
            region: self.region,
            credentials: self.credentials,
            profile: self.profile,
            region_source: self.region_source,
            credentials_source: self.credentials_source,
            secrets_path,
        }
    }
}
