//! The resolution stages, in chain order
//!
//! Each stage reads and writes the shared [`ResolutionState`]. A stage leaves
//! a field alone once it is set, except that a profile selected explicitly or
//! on the command line replaces the seeded instance-role credentials.

use std::path::PathBuf;

use crate::cli::{process_args, CliFlags, CliOptions};
use crate::credentials::Credentials;
use crate::env::{
    EnvSource, AWS_ACCESS_KEY_ID, AWS_DEFAULT_REGION, AWS_PROFILE, AWS_REGION,
    AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN,
};
use crate::error::ResolveResult;
use crate::logging::Logger;
use crate::profiles::{ProfileStore, DEFAULT_PROFILE};
use crate::secrets_file::{
    SecretsFile, ACCESS_KEY_ID_KEY, DEFAULT_SECRETS_PATH, REGION_KEY, SECRET_ACCESS_KEY_KEY,
};
use crate::{log_debug, log_warn};
use super::options::ResolveOptions;
use super::resolution::Source;
use super::state::ResolutionState;

/// Collaborators available to every stage
pub(crate) struct Context<'a> {
    pub options: &'a ResolveOptions,
    pub env: &'a dyn EnvSource,
    pub profiles: &'a dyn ProfileStore,
    pub logger: &'a dyn Logger,
}

pub(crate) type Strategy = fn(&mut ResolutionState, &Context<'_>) -> ResolveResult<()>;

/// The chain, in the order it runs
pub(crate) const CHAIN: [(&str, Strategy); 7] = [
    ("instance-role", instance_role),
    ("explicit-profile", explicit_profile),
    ("command-line", command_line),
    ("environment", environment),
    ("secrets-file", secrets_file),
    ("shared-credentials-file", shared_credentials_file),
    ("config-file", config_file),
];

/// Secrets file the secrets-file stage reads
pub(crate) fn effective_secrets_path(state: &ResolutionState) -> PathBuf {
    state
        .secrets_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH))
}

/// Seed instance-role credentials.
///
/// Writes: `credentials`. Runs first, so the environment, secrets-file and
/// shared-file stages find credentials already set and keep them.
fn instance_role(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    if !ctx.options.instance_role {
        log_debug!(ctx.logger, "instance-role: skipped by options");
        return Ok(());
    }
    if state.set_credentials(Credentials::InstanceRole, Source::InstanceRole) {
        log_debug!(ctx.logger, "instance-role: seeded role credentials");
    }
    Ok(())
}

/// Apply the profile the caller passed in.
///
/// Reads: `profile`, `explicit_profile`. Writes: `region` (if unset),
/// `credentials` (always).
fn explicit_profile(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    if !state.explicit_profile {
        return Ok(());
    }
    if let Some(profile) = state.profile.clone() {
        apply_profile(state, ctx, &profile, Source::ExplicitProfile);
    }
    Ok(())
}

/// Pick `--profile`, `--region` and `--secrets_path` out of the argument list.
///
/// Skipped when the caller passed a profile. Only flags for fields that are
/// still unset are recognized. Reads and writes: `profile`, `region`,
/// `secrets_path`; writes `credentials` (always) when a profile was found.
fn command_line(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    if state.explicit_profile {
        return Ok(());
    }

    let wanted = CliFlags {
        profile: state.profile.is_none(),
        region: !state.has_region(),
        secrets_path: state.secrets_path.is_none(),
    };
    let found = match &ctx.options.argv {
        Some(argv) => CliOptions::scan(argv, wanted),
        None => CliOptions::scan(process_args(), wanted),
    };
    if found.is_empty() {
        log_debug!(ctx.logger, "command-line: no flags found");
        return Ok(());
    }

    if state.set_region(found.region, Source::CommandLine) {
        log_debug!(ctx.logger, "command-line: region from --region");
    }
    if let Some(path) = found.secrets_path {
        log_debug!(ctx.logger, "command-line: secrets path {}", path.display());
        state.secrets_path = Some(path);
    }
    if let Some(profile) = found.profile {
        state.profile = Some(profile.clone());
        apply_profile(state, ctx, &profile, Source::CommandLine);
    }
    Ok(())
}

/// Read the standard AWS environment variables.
///
/// Writes: `region` from `AWS_REGION` then `AWS_DEFAULT_REGION`. When
/// credentials are still unset: a shared-file reference for `AWS_PROFILE`
/// (also writing `profile`), otherwise a key pair from `AWS_ACCESS_KEY_ID`,
/// `AWS_SECRET_ACCESS_KEY` and the optional `AWS_SESSION_TOKEN`.
fn environment(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    let env = ctx.env;
    if state.set_region(env.first_of(&[AWS_REGION, AWS_DEFAULT_REGION]), Source::Environment) {
        log_debug!(ctx.logger, "environment: region from {}", env_region_name(env));
    }

    if state.has_credentials() {
        return Ok(());
    }
    if let Some(profile) = env.get(AWS_PROFILE) {
        log_debug!(ctx.logger, "environment: credentials from AWS_PROFILE={}", profile);
        state.set_credentials(Credentials::shared(profile.clone()), Source::Environment);
        state.profile = Some(profile);
        return Ok(());
    }
    if let (Some(access_key_id), Some(secret_access_key)) =
        (env.get(AWS_ACCESS_KEY_ID), env.get(AWS_SECRET_ACCESS_KEY))
    {
        log_debug!(ctx.logger, "environment: credentials from access key variables");
        state.set_credentials(
            Credentials::from_keys(access_key_id, secret_access_key, env.get(AWS_SESSION_TOKEN)),
            Source::Environment,
        );
    }
    Ok(())
}

fn env_region_name(env: &dyn EnvSource) -> &'static str {
    if env.has(AWS_REGION) {
        AWS_REGION
    } else {
        AWS_DEFAULT_REGION
    }
}

/// Read the project-local secrets file.
///
/// Reads: `secrets_path`. Writes: `region` and `credentials` when unset. The
/// file is parsed whenever it exists, so a malformed file fails the call even
/// if nothing would be taken from it.
fn secrets_file(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    let path = effective_secrets_path(state);
    let Some(file) = SecretsFile::load(&path)? else {
        log_debug!(ctx.logger, "secrets-file: {} not found", path.display());
        return Ok(());
    };

    if state.set_region(file.get(REGION_KEY), Source::SecretsFile) {
        log_debug!(ctx.logger, "secrets-file: region from {}", path.display());
    }
    if state.has_credentials() {
        return Ok(());
    }
    if let (Some(access_key_id), Some(secret_access_key)) =
        (file.get(ACCESS_KEY_ID_KEY), file.get(SECRET_ACCESS_KEY_KEY))
    {
        log_debug!(ctx.logger, "secrets-file: credentials from {}", path.display());
        state.set_credentials(
            Credentials::from_keys(access_key_id, secret_access_key, None),
            Source::SecretsFile,
        );
    }
    Ok(())
}

/// Fall back to the shared credentials file's own default profile.
///
/// Writes: `credentials` when unset.
fn shared_credentials_file(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    if state.set_credentials(Credentials::shared_default(), Source::SharedCredentialsFile) {
        log_debug!(ctx.logger, "shared-credentials-file: using default profile resolution");
    }
    Ok(())
}

/// Take the region from the CLI config file.
///
/// Reads: `profile`. Writes: `region` when unset. An unknown `profile` falls
/// back to `default`; a known profile without a region does not.
fn config_file(state: &mut ResolutionState, ctx: &Context<'_>) -> ResolveResult<()> {
    if state.has_region() {
        return Ok(());
    }

    let config = state
        .profile
        .as_deref()
        .and_then(|profile| ctx.profiles.lookup(profile))
        .or_else(|| ctx.profiles.lookup(DEFAULT_PROFILE));
    let Some(config) = config else {
        log_debug!(ctx.logger, "config-file: no profile found in {}", ctx.profiles.name());
        return Ok(());
    };
    if state.set_region(config.region().map(str::to_string), Source::ConfigFile) {
        log_debug!(ctx.logger, "config-file: region from {}", ctx.profiles.name());
    }
    Ok(())
}

/// Shared by the explicit-profile and command-line stages
fn apply_profile(state: &mut ResolutionState, ctx: &Context<'_>, profile: &str, source: Source) {
    match ctx.profiles.lookup(profile) {
        Some(config) => {
            if state.set_region(config.region().map(str::to_string), source) {
                log_debug!(ctx.logger, "{}: region from profile {}", source, profile);
            }
        }
        None => {
            log_warn!(ctx.logger, "{}: profile {} not found in {}", source, profile, ctx.profiles.name());
        }
    }
    state.override_credentials(Credentials::shared(profile), source);
}
