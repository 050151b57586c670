//! Project-local secrets file (`secrets.yml`)
//!
//! A flat YAML mapping. The keys the resolver reads are `region`,
//! `aws_access_key_id` and `aws_secret_access_key`; anything else is kept but
//! ignored.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{ResolveError, ResolveResult};

/// Secrets file looked for when no other path is given
pub const DEFAULT_SECRETS_PATH: &str = "secrets.yml";

pub const REGION_KEY: &str = "region";
pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";

/// Parsed contents of a secrets file
///
/// # Example
///
/// ```no_run
/// use awsecrets_core::secrets_file::SecretsFile;
///
/// if let Some(file) = SecretsFile::load("secrets.yml").unwrap() {
///     println!("region: {:?}", file.get("region"));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretsFile {
    path: PathBuf,
    values: Mapping,
}

impl SecretsFile {
    /// Read and parse the file at `path`
    ///
    /// Returns `Ok(None)` if the file does not exist. Content that is not a
    /// YAML mapping is an error.
    pub fn load(path: impl AsRef<Path>) -> ResolveResult<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ResolveError::io(path, e)),
        };
        Self::parse(path, &content).map(Some)
    }

    /// Parse already-read content; `path` is only used in errors
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> ResolveResult<Self> {
        let path = path.into();
        if content.trim().is_empty() {
            return Ok(Self {
                path,
                values: Mapping::new(),
            });
        }

        let document: Value = serde_yaml::from_str(content).map_err(|source| {
            ResolveError::MalformedSecretsFile {
                path: path.clone(),
                source,
            }
        })?;

        let values = match document {
            Value::Mapping(values) => values,
            Value::Null => Mapping::new(),
            other => {
                return Err(ResolveError::NotAMapping {
                    path,
                    found: kind_of(&other),
                })
            }
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scalar value under `key`, as a string
    ///
    /// Null, empty strings, and nested sequences or mappings count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Presence check used before adopting a value
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let loaded = SecretsFile::load(dir.path().join("secrets.yml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.yml");
        fs::write(
            &path,
            "region: ap-southeast-1\naws_access_key_id: AKIAEXAMPLE\naws_secret_access_key: secret\n",
        )
        .unwrap();

        let file = SecretsFile::load(&path).unwrap().unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.len(), 3);
        assert_eq!(file.get(REGION_KEY), Some("ap-southeast-1".to_string()));
        assert_eq!(file.get(ACCESS_KEY_ID_KEY), Some("AKIAEXAMPLE".to_string()));
        assert!(file.contains(SECRET_ACCESS_KEY_KEY));
        assert!(!file.contains("aws_session_token"));
    }

    #[test]
    fn test_scalar_values_are_stringified() {
        let file = SecretsFile::parse("secrets.yml", "aws_access_key_id: 12345\nflag: true\n").unwrap();
        assert_eq!(file.get("aws_access_key_id"), Some("12345".to_string()));
        assert_eq!(file.get("flag"), Some("true".to_string()));
    }

    #[test]
    fn test_null_and_nested_values_are_absent() {
        let content = "region:\nnested:\n  a: b\nlist: [1, 2]\nblank: ''\n";
        let file = SecretsFile::parse("secrets.yml", content).unwrap();
        assert!(!file.contains("region"));
        assert!(!file.contains("nested"));
        assert!(!file.contains("list"));
        assert!(!file.contains("blank"));
    }

    #[test]
    fn test_empty_file_is_empty_mapping() {
        let file = SecretsFile::parse("secrets.yml", "\n  \n").unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn test_unparsable_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.yml");
        fs::write(&path, "region: [unterminated\n").unwrap();

        let err = SecretsFile::load(&path).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedSecretsFile { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_non_mapping_document_is_fatal() {
        let err = SecretsFile::parse("secrets.yml", "- region\n- us-east-1\n").unwrap_err();
        assert!(matches!(err, ResolveError::NotAMapping { found: "sequence", .. }));

        let err = SecretsFile::parse("secrets.yml", "just a string\n").unwrap_err();
        assert!(matches!(err, ResolveError::NotAMapping { found: "string", .. }));
    }

    #[test]
    fn test_directory_path_is_io_error() {
        let dir = tempdir().unwrap();
        let err = SecretsFile::load(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
    }
}
