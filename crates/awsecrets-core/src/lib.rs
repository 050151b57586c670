//! awsecrets Core
//!
//! Works out which AWS region and which credentials a client should use, from
//! an ordered chain of sources: instance role, an explicitly chosen profile,
//! command-line flags, environment variables, a project-local `secrets.yml`,
//! the shared credentials file and the CLI config file. The first source to
//! supply a field wins it.
//!
//! The crate only decides; it does not call AWS. A
//! [`Credentials::SharedFile`] result names a profile for the host SDK to read,
//! and [`shared::SharedCredentialsFile`] can materialize it when the host wants
//! the keys directly.
//!
//! ```rust,no_run
//! use awsecrets_core::{load, ResolveOptions};
//!
//! let resolution = load(&ResolveOptions::new().with_profile("prod"))?;
//! println!("region: {:?}", resolution.region);
//! println!("credentials: {:?}", resolution.credentials);
//! # Ok::<(), awsecrets_core::ResolveError>(())
//! ```

pub mod error;
pub mod credentials;
pub mod env;
pub mod profiles;
pub mod shared;
pub mod secrets_file;
pub mod cli;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use error::{ResolveError, ResolveResult};

pub use credentials::{Credentials, StaticCredentials};

pub use env::{EnvSource, MemoryEnv, ProcessEnv};

pub use profiles::{ProfileStore, ProfileConfig, MemoryProfileStore, FileProfileStore};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use resolver::{load, Resolver, ResolveOptions, Resolution, Source};
