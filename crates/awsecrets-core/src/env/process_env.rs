//! Process environment source

use std::env;

use super::traits::EnvSource;

/// Environment source backed by the variables of the running process
///
/// Values that are not valid unicode are treated as unset.
///
/// # Example
///
/// ```
/// use awsecrets_core::env::{EnvSource, ProcessEnv};
///
/// let env = ProcessEnv::new();
/// let region = env.first_of(&["AWS_REGION", "AWS_DEFAULT_REGION"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_env_name() {
        assert_eq!(ProcessEnv::new().name(), "process");
    }

    #[test]
    fn test_process_env_get() {
        env::set_var("AWSECRETS_TEST_PROCESS_ENV_7731", "value");

        let source = ProcessEnv::new();
        assert_eq!(source.get("AWSECRETS_TEST_PROCESS_ENV_7731"), Some("value".to_string()));

        env::remove_var("AWSECRETS_TEST_PROCESS_ENV_7731");
        assert_eq!(source.get("AWSECRETS_TEST_PROCESS_ENV_7731"), None);
    }

    #[test]
    fn test_process_env_empty_is_unset() {
        env::set_var("AWSECRETS_TEST_PROCESS_EMPTY_7731", "");

        let source = ProcessEnv::new();
        assert!(!source.has("AWSECRETS_TEST_PROCESS_EMPTY_7731"));

        env::remove_var("AWSECRETS_TEST_PROCESS_EMPTY_7731");
    }
}
