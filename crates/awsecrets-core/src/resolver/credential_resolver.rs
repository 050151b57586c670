//! Region and credential resolution from multiple sources
//!
//! Stages run in this order, each filling only fields that are still unset:
//! 1. Instance role (credentials)
//! 2. Profile passed by the caller (region; replaces credentials)
//! 3. Command-line flags (region, secrets path, profile; a profile replaces credentials)
//! 4. Environment variables
//! 5. Local secrets file (`secrets.yml`)
//! 6. Shared credentials file (credentials)
//! 7. CLI config file (region)

use std::sync::Arc;

use crate::env::{EnvSource, ProcessEnv, SharedEnv};
use crate::error::ResolveResult;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::profiles::{FileProfileStore, ProfileStore, SharedProfileStore};
use crate::{log_debug, log_info};
use super::options::ResolveOptions;
use super::resolution::Resolution;
use super::state::ResolutionState;
use super::strategies::{effective_secrets_path, Context, CHAIN};

/// Resolver for a region and a credential value
///
/// The resolver holds only its collaborators. Every call to
/// [`resolve`](Self::resolve) starts from fresh state, so one resolver can be
/// shared between threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use awsecrets_core::{Credentials, ResolveOptions, Resolver};
/// use awsecrets_core::env::MemoryEnv;
/// use awsecrets_core::profiles::{MemoryProfileStore, ProfileConfig};
///
/// let profiles = MemoryProfileStore::new();
/// profiles.insert("prod", ProfileConfig::new().with_region("us-west-2"));
///
/// let resolver = Resolver::new()
///     .with_env(Arc::new(MemoryEnv::new()))
///     .with_profile_store(Arc::new(profiles));
///
/// let options = ResolveOptions::new()
///     .with_profile("prod")
///     .with_secrets_path("/nonexistent/secrets.yml")
///     .with_argv(Vec::<String>::new());
/// let resolution = resolver.resolve(&options).unwrap();
///
/// assert_eq!(resolution.region.as_deref(), Some("us-west-2"));
/// assert_eq!(resolution.credentials, Some(Credentials::shared("prod")));
/// ```
#[derive(Clone)]
pub struct Resolver {
    env: SharedEnv,
    /// `None` reads the config file named by the environment, afresh per call
    profiles: Option<SharedProfileStore>,
    logger: SharedLogger,
}

impl Resolver {
    /// Create a resolver over the process environment and `~/.aws/config`
    pub fn new() -> Self {
        Self {
            env: Arc::new(ProcessEnv::new()),
            profiles: None,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Read environment variables from `env`
    ///
    /// Also decides which config file is read when no profile store is set.
    pub fn with_env(mut self, env: SharedEnv) -> Self {
        self.env = env;
        self
    }

    /// Look profiles up in `profiles` instead of the config file
    pub fn with_profile_store(mut self, profiles: SharedProfileStore) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Run the whole chain once
    ///
    /// Missing files, variables and profiles leave fields unset. Fails only
    /// when the secrets file exists but cannot be read or parsed.
    pub fn resolve(&self, options: &ResolveOptions) -> ResolveResult<Resolution> {
        let profiles: SharedProfileStore = match &self.profiles {
            Some(profiles) => Arc::clone(profiles),
            None => Arc::new(FileProfileStore::from_env(self.env.as_ref())),
        };
        let ctx = Context {
            options,
            env: self.env.as_ref(),
            profiles: profiles.as_ref(),
            logger: self.logger.as_ref(),
        };

        let mut state = ResolutionState::from_options(options);
        for (name, strategy) in CHAIN {
            strategy(&mut state, &ctx)?;
            log_debug!(
                self.logger,
                "after {}: region={} credentials={}",
                name,
                state.region_source.map_or("unset", |s| s.as_str()),
                state.credentials.as_ref().map_or("unset", |c| c.kind()),
            );
        }

        let secrets_path = effective_secrets_path(&state);
        let resolution = state.into_resolution(secrets_path);
        log_info!(
            self.logger,
            "resolved region {} ({}), {} credentials ({})",
            resolution.region.as_deref().unwrap_or("<none>"),
            resolution.region_source.map_or("unset", |s| s.as_str()),
            resolution.credentials.as_ref().map_or("no", |c| c.kind()),
            resolution.credentials_source.map_or("unset", |s| s.as_str()),
        );
        Ok(resolution)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("env", &self.env.name())
            .field("profiles", &self.profiles.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Resolve with the process environment and the default files
pub fn load(options: &ResolveOptions) -> ResolveResult<Resolution> {
    Resolver::new().resolve(options)
}
