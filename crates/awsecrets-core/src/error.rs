//! Error types for region and credential resolution
//!
//! Absence of a value is never an error: a source that has nothing to offer
//! leaves the field unset. Only malformed local input is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or materializing credentials
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The local secrets file exists but could not be parsed
    #[error("Malformed secrets file {path}: {source}")]
    MalformedSecretsFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The local secrets file parsed, but its top level is not a mapping
    #[error("Malformed secrets file {path}: expected a mapping, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A file could not be read for a reason other than not existing
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A named profile does not exist in the shared credentials file
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// A profile exists but lacks a required key
    #[error("Profile {profile} is missing {key}")]
    IncompleteProfile { profile: String, key: &'static str },

    /// No source supplied a region
    #[error("No region could be resolved")]
    MissingRegion,

    /// No source supplied credentials
    #[error("No credentials could be resolved")]
    MissingCredentials,
}

impl ResolveError {
    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an incomplete profile error
    pub fn incomplete_profile(profile: impl Into<String>, key: &'static str) -> Self {
        Self::IncompleteProfile {
            profile: profile.into(),
            key,
        }
    }

    /// Whether this error came from unparsable local input
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSecretsFile { .. } | Self::NotAMapping { .. })
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
