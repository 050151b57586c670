//! Tolerant scanner for `--profile`, `--region` and `--secrets_path`
//!
//! The token list usually belongs to a host program with flags of its own, so
//! anything the scanner does not recognize is skipped instead of rejected:
//! unknown flags, their values, positionals, and flags the caller did not
//! enable. Both `--flag value` and `--flag=value` are accepted, and a later
//! occurrence of a flag replaces an earlier one. Scanning stops at `--`.

use std::env;
use std::path::PathBuf;

/// Which flags a scan recognizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliFlags {
    pub profile: bool,
    pub region: bool,
    pub secrets_path: bool,
}

impl CliFlags {
    pub fn all() -> Self {
        Self {
            profile: true,
            region: true,
            secrets_path: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.profile || self.region || self.secrets_path)
    }

    fn allows(&self, flag: Flag) -> bool {
        match flag {
            Flag::Profile => self.profile,
            Flag::Region => self.region,
            Flag::SecretsPath => self.secrets_path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Profile,
    Region,
    SecretsPath,
}

impl Flag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "profile" => Some(Flag::Profile),
            "region" => Some(Flag::Region),
            "secrets_path" | "secrets-path" => Some(Flag::SecretsPath),
            _ => None,
        }
    }
}

/// Values picked out of a token list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub secrets_path: Option<PathBuf>,
}

impl CliOptions {
    /// Scan `tokens` for the flags enabled in `wanted`
    ///
    /// Never fails. A recognized flag without a value (end of input, an empty
    /// `--flag=`, or a following token that is itself a `--flag`) is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use awsecrets_core::cli::{CliFlags, CliOptions};
    ///
    /// let options = CliOptions::scan(["--foo", "bar", "--region", "us-east-1"], CliFlags::all());
    /// assert_eq!(options.region.as_deref(), Some("us-east-1"));
    /// ```
    pub fn scan<I, S>(tokens: I, wanted: CliFlags) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        if wanted.is_empty() {
            return options;
        }

        let mut tokens = tokens.into_iter().peekable();
        while let Some(token) = tokens.next() {
            let token = token.as_ref();
            if token == "--" {
                break;
            }
            let Some(body) = token.strip_prefix("--") else {
                continue;
            };
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };
            let Some(flag) = Flag::from_name(name).filter(|flag| wanted.allows(*flag)) else {
                continue;
            };

            let value = match inline {
                Some(value) => value,
                None => match tokens.peek() {
                    Some(next) if !next.as_ref().starts_with("--") => {
                        let value = next.as_ref().to_string();
                        tokens.next();
                        value
                    }
                    _ => continue,
                },
            };
            if value.is_empty() {
                continue;
            }
            options.set(flag, value);
        }

        options
    }

    /// Check if no flag was found
    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.region.is_none() && self.secrets_path.is_none()
    }

    fn set(&mut self, flag: Flag, value: String) {
        match flag {
            Flag::Profile => self.profile = Some(value),
            Flag::Region => self.region = Some(value),
            Flag::SecretsPath => self.secrets_path = Some(PathBuf::from(value)),
        }
    }
}

/// Arguments of the running process, without the program name
///
/// Arguments that are not valid unicode are converted lossily.
pub fn process_args() -> Vec<String> {
    env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_ignores_unknown_flags() {
        let options = CliOptions::scan(["--foo", "bar", "--region", "us-east-1"], CliFlags::all());
        assert_eq!(options.region.as_deref(), Some("us-east-1"));
        assert_eq!(options.profile, None);
        assert_eq!(options.secrets_path, None);
    }

    #[test]
    fn test_scan_all_flags() {
        let options = CliOptions::scan(
            ["run", "--profile", "prod", "--secrets_path=conf/secrets.yml", "--region=eu-west-1"],
            CliFlags::all(),
        );
        assert_eq!(options.profile.as_deref(), Some("prod"));
        assert_eq!(options.region.as_deref(), Some("eu-west-1"));
        assert_eq!(options.secrets_path, Some(PathBuf::from("conf/secrets.yml")));
    }

    #[test]
    fn test_scan_disabled_flags_are_unknown() {
        let wanted = CliFlags {
            profile: true,
            region: false,
            secrets_path: false,
        };
        let options = CliOptions::scan(
            ["--region", "us-east-1", "--profile", "dev", "--secrets_path", "x.yml"],
            wanted,
        );
        assert_eq!(options.region, None);
        assert_eq!(options.secrets_path, None);
        assert_eq!(options.profile.as_deref(), Some("dev"));
    }

    #[test]
    fn test_scan_no_flags_wanted() {
        let options = CliOptions::scan(["--profile", "dev"], CliFlags::none());
        assert!(options.is_empty());
    }

    #[test]
    fn test_scan_missing_values() {
        let options = CliOptions::scan(["--region"], CliFlags::all());
        assert_eq!(options.region, None);

        let options = CliOptions::scan(["--region", "--profile", "dev"], CliFlags::all());
        assert_eq!(options.region, None);
        assert_eq!(options.profile.as_deref(), Some("dev"));

        let options = CliOptions::scan(["--region="], CliFlags::all());
        assert_eq!(options.region, None);
    }

    #[test]
    fn test_scan_last_occurrence_wins() {
        let options = CliOptions::scan(
            ["--region", "us-east-1", "--region", "us-west-2"],
            CliFlags::all(),
        );
        assert_eq!(options.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn test_scan_stops_at_double_dash() {
        let options = CliOptions::scan(["--", "--region", "us-east-1"], CliFlags::all());
        assert!(options.is_empty());
    }

    #[test]
    fn test_scan_single_dash_is_not_a_flag() {
        let options = CliOptions::scan(["-region", "us-east-1", "-p", "x"], CliFlags::all());
        assert!(options.is_empty());
    }

    #[test]
    fn test_scan_accepts_owned_strings() {
        let tokens = vec!["--profile".to_string(), "prod".to_string()];
        let options = CliOptions::scan(&tokens, CliFlags::all());
        assert_eq!(options.profile.as_deref(), Some("prod"));
    }
}
