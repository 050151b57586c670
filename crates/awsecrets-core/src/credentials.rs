//! Credential values produced by the resolver
//!
//! A resolved credential is a descriptor, not key material fetched over the
//! network: the role and shared-file variants are references that the AWS SDK
//! (or [`SharedCredentialsFile`](crate::shared::SharedCredentialsFile)) turns
//! into keys when they are actually used.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An access key pair with an optional session token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCredentials {
    access_key_id: String,
    secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_token: Option<String>,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token (temporary credentials)
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// The credential half of a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Keys come from the instance role at the point of use
    InstanceRole,
    /// Keys come from the shared credentials file; `None` lets the file's own
    /// default-profile rules apply
    SharedFile { profile: Option<String> },
    /// Keys supplied directly
    Static(StaticCredentials),
}

impl Credentials {
    /// Shared-file reference bound to a profile name
    pub fn shared(profile: impl Into<String>) -> Self {
        Self::SharedFile {
            profile: Some(profile.into()),
        }
    }

    /// Shared-file reference with no explicit profile
    pub fn shared_default() -> Self {
        Self::SharedFile { profile: None }
    }

    pub fn from_keys(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        let keys = StaticCredentials::new(access_key_id, secret_access_key);
        match session_token {
            Some(token) => Self::Static(keys.with_session_token(token)),
            None => Self::Static(keys),
        }
    }

    /// Short stable name for logs and bindings
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InstanceRole => "instance_role",
            Self::SharedFile { .. } => "shared_file",
            Self::Static(_) => "static",
        }
    }

    /// Profile a shared-file reference is bound to
    pub fn profile(&self) -> Option<&str> {
        match self {
            Self::SharedFile { profile } => profile.as_deref(),
            _ => None,
        }
    }

    pub fn as_static(&self) -> Option<&StaticCredentials> {
        match self {
            Self::Static(keys) => Some(keys),
            _ => None,
        }
    }
}
