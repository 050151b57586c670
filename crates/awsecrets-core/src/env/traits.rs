//! Environment source trait

use std::sync::Arc;

/// Read-only view of environment variables
///
/// Implementations must treat an empty value the same as an unset variable.
pub trait EnvSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Value of `key`, or `None` if unset or empty
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a variable is set to a non-empty value
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First of `keys` that is set, in order
    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }
}

/// Type alias for an Arc-wrapped environment source
pub type SharedEnv = Arc<dyn EnvSource>;
