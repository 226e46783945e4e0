use std::time::Duration;

use thiserror::Error;

use purifly_api::ApiError;

/// Errors surfaced by the session layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Setup could not complete yet. Recoverable: the host application is
    /// expected to reschedule [`setup_device`](crate::setup_device) — this
    /// layer performs no retry of its own. Raised for both connect failures
    /// and first-refresh failures.
    #[error("device {host} not ready: {reason}")]
    NotReady { host: String, reason: String },

    /// A session for this host already exists; the existing session is left
    /// untouched.
    #[error("device {0} is already registered")]
    AlreadyRegistered(String),

    /// No session exists for this host.
    #[error("device {0} is not registered")]
    DeviceNotRegistered(String),

    /// An explicitly configured deadline elapsed.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CoreError {
    pub(crate) fn not_ready(host: &str, reason: impl std::fmt::Display) -> Self {
        Self::NotReady {
            host: host.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error means "try setup again later".
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}
