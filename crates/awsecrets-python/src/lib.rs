//! Python bindings for awsecrets via PyO3

use pyo3::prelude::*;
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use std::path::PathBuf;

use awsecrets_core::{
    Credentials as CoreCredentials,
    ResolveError,
    ResolveOptions,
    Resolution as CoreResolution,
    Resolver,
};
use awsecrets_core::env::ProcessEnv;
use awsecrets_core::shared::SharedCredentialsFile;

fn to_py_err(err: ResolveError) -> PyErr {
    match err {
        ResolveError::Io { .. } => PyOSError::new_err(err.to_string()),
        e if e.is_malformed() => PyValueError::new_err(e.to_string()),
        e => PyRuntimeError::new_err(e.to_string()),
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Resolved credential value
///
/// `kind` is one of `instance_role`, `shared_file` or `static`. The secret
/// key and session token are readable but never shown by `repr`.
#[pyclass]
#[derive(Clone)]
pub struct Credentials {
    #[pyo3(get)]
    pub kind: String,
    #[pyo3(get)]
    pub profile: Option<String>,
    #[pyo3(get)]
    pub access_key_id: Option<String>,
    #[pyo3(get)]
    pub secret_access_key: Option<String>,
    #[pyo3(get)]
    pub session_token: Option<String>,
    inner: CoreCredentials,
}

#[pymethods]
impl Credentials {
    /// Read the key pair this value refers to
    ///
    /// Static keys are returned as they are; a shared-file reference is read
    /// from the shared credentials file. Returns `None` for instance-role
    /// credentials.
    pub fn materialize(&self) -> PyResult<Option<Credentials>> {
        let file = SharedCredentialsFile::from_env(&ProcessEnv::new());
        let keys = file.materialize(&self.inner).map_err(to_py_err)?;
        Ok(keys.map(|keys| CoreCredentials::Static(keys).into()))
    }

    fn __repr__(&self) -> String {
        match (&self.profile, &self.access_key_id) {
            (Some(profile), _) => format!("Credentials(kind='{}', profile='{}')", self.kind, profile),
            (None, Some(key)) => format!("Credentials(kind='{}', access_key_id='{}')", self.kind, key),
            (None, None) => format!("Credentials(kind='{}')", self.kind),
        }
    }

    fn __eq__(&self, other: &Credentials) -> bool {
        self.inner == other.inner
    }
}

impl From<CoreCredentials> for Credentials {
    fn from(credentials: CoreCredentials) -> Self {
        let keys = credentials.as_static();
        Self {
            kind: credentials.kind().to_string(),
            profile: credentials.profile().map(str::to_string),
            access_key_id: keys.map(|k| k.access_key_id().to_string()),
            secret_access_key: keys.map(|k| k.secret_access_key().to_string()),
            session_token: keys.and_then(|k| k.session_token()).map(str::to_string),
            inner: credentials,
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

#[pyclass]
#[derive(Clone)]
pub struct Resolution {
    #[pyo3(get)]
    pub region: Option<String>,
    #[pyo3(get)]
    pub credentials: Option<Credentials>,
    #[pyo3(get)]
    pub profile: Option<String>,
    #[pyo3(get)]
    pub region_source: Option<String>,
    #[pyo3(get)]
    pub credentials_source: Option<String>,
    #[pyo3(get)]
    pub secrets_path: PathBuf,
}

#[pymethods]
impl Resolution {
    fn __repr__(&self) -> String {
        let credentials = self
            .credentials
            .as_ref()
            .map_or("None".to_string(), |c| c.__repr__());
        format!(
            "Resolution(region={:?}, credentials={}, region_source={:?}, credentials_source={:?})",
            self.region, credentials, self.region_source, self.credentials_source
        )
    }
}

impl From<CoreResolution> for Resolution {
    fn from(resolution: CoreResolution) -> Self {
        Self {
            region: resolution.region,
            credentials: resolution.credentials.map(Into::into),
            profile: resolution.profile,
            region_source: resolution.region_source.map(|s| s.to_string()),
            credentials_source: resolution.credentials_source.map(|s| s.to_string()),
            secrets_path: resolution.secrets_path,
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Resolve the region and credentials for this process
///
/// `argv` replaces `sys.argv[1:]` as the list scanned for `--profile`,
/// `--region` and `--secrets_path`; the process arguments are used when it
/// is `None`. Raises `ValueError` for a malformed secrets file and
/// `OSError` when it exists but cannot be read.
#[pyfunction]
#[pyo3(signature = (profile=None, region=None, secrets_path=None, argv=None, instance_role=true))]
fn load(
    py: Python<'_>,
    profile: Option<String>,
    region: Option<String>,
    secrets_path: Option<PathBuf>,
    argv: Option<Vec<String>>,
    instance_role: bool,
) -> PyResult<Resolution> {
    let options = ResolveOptions {
        profile,
        region,
        secrets_path,
        argv,
        instance_role,
    };
    let resolution = py
        .allow_threads(|| Resolver::new().resolve(&options))
        .map_err(to_py_err)?;
    Ok(resolution.into())
}

// ============================================================================
// Module Definition
// ============================================================================

#[pymodule]
fn awsecrets(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Credentials>()?;
    m.add_class::<Resolution>()?;

    m.add_function(wrap_pyfunction!(load, m)?)?;

    Ok(())
}
