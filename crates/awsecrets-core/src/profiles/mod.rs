//! Named profile configuration
//!
//! Profiles are looked up by name through the [`ProfileStore`] trait:
//! - `FileProfileStore`: the CLI-style config file (`~/.aws/config`)
//! - `MemoryProfileStore`: in-memory for testing and embedding hosts

mod traits;
mod memory;
mod file;
pub(crate) mod ini;

pub use traits::{ProfileStore, ProfileConfig, SharedProfileStore, DEFAULT_PROFILE};
pub use memory::MemoryProfileStore;
pub use file::FileProfileStore;
