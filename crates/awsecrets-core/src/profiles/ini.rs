//! Reader for the INI dialect shared by `~/.aws/config` and `~/.aws/credentials`
//!
//! Only what profile lookup needs: `[section]` headers, `key = value` lines,
//! `#`/`;` comments. Indented lines continue a nested property and are skipped.
//! Lines that fit none of these are ignored rather than rejected.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::env::EnvSource;
use crate::error::{ResolveError, ResolveResult};

/// One `[header]` block and the settings under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    pub header: String,
    pub settings: BTreeMap<String, String>,
}

pub(crate) fn parse(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut in_section = false;

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if raw.starts_with(char::is_whitespace) {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            match rest.split_once(']') {
                Some((header, _)) if !header.trim().is_empty() => {
                    sections.push(Section {
                        header: header.trim().to_string(),
                        settings: BTreeMap::new(),
                    });
                    in_section = true;
                }
                _ => in_section = false,
            }
            continue;
        }

        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if let Some(section) = sections.last_mut() {
                section
                    .settings
                    .insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    sections
}

/// Read and parse a file; a missing file has no sections
pub(crate) fn read(path: &Path) -> ResolveResult<Vec<Section>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(ResolveError::io(path, e)),
    }
}

/// Location of an AWS file: `override_var` if set, else `~/.aws/<file_name>`
pub(crate) fn default_location(
    env: &dyn EnvSource,
    override_var: &str,
    file_name: &str,
) -> Option<PathBuf> {
    if let Some(path) = env.get(override_var) {
        return Some(expand_home(&path));
    }
    dirs::home_dir().map(|home| home.join(".aws").join(file_name))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
