//! Environment variable access
//!
//! The resolver reads the environment through [`EnvSource`] so that a resolve
//! call can run against the real process environment or a fixed map:
//! - `ProcessEnv` reads `std::env`
//! - `MemoryEnv` holds a fixed set of variables (tests, embedding hosts)

mod traits;
mod process_env;
mod memory_env;

pub use traits::{EnvSource, SharedEnv};
pub use process_env::ProcessEnv;
pub use memory_env::MemoryEnv;

/// Region, checked first
pub const AWS_REGION: &str = "AWS_REGION";
/// Region, checked when `AWS_REGION` is absent
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
/// Named profile for shared-file credentials
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
/// Override for the location of `~/.aws/config`
pub const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";
/// Override for the location of `~/.aws/credentials`
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";
