//! In-memory environment source

use std::collections::HashMap;

use super::traits::EnvSource;

/// Environment source holding a fixed set of variables
///
/// Lets a resolve call run without touching the process environment, which
/// is shared by every thread in the process.
///
/// # Example
///
/// ```
/// use awsecrets_core::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::from_slice(&[("AWS_REGION", "eu-central-1")]);
/// assert_eq!(env.get("AWS_REGION"), Some("eu-central-1".to_string()));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Add or replace a variable
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MemoryEnv {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|value| !value.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_env_get() {
        let env = MemoryEnv::from_slice(&[("AWS_REGION", "us-west-2")]);
        assert_eq!(env.get("AWS_REGION"), Some("us-west-2".to_string()));
        assert_eq!(env.get("AWS_DEFAULT_REGION"), None);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_memory_env_empty_value_is_unset() {
        let env = MemoryEnv::new().with_var("AWS_PROFILE", "");
        assert!(!env.has("AWS_PROFILE"));
        assert!(!env.is_empty());
    }

    #[test]
    fn test_first_of_respects_order() {
        let env = MemoryEnv::from_slice(&[
            ("AWS_REGION", "eu-west-1"),
            ("AWS_DEFAULT_REGION", "us-east-1"),
        ]);
        assert_eq!(
            env.first_of(&["AWS_REGION", "AWS_DEFAULT_REGION"]),
            Some("eu-west-1".to_string())
        );

        let env = MemoryEnv::from_slice(&[("AWS_DEFAULT_REGION", "us-east-1")]);
        assert_eq!(
            env.first_of(&["AWS_REGION", "AWS_DEFAULT_REGION"]),
            Some("us-east-1".to_string())
        );
    }
}
