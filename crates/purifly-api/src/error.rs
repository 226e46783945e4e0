use thiserror::Error;

/// Errors surfaced by the device client layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Socket-level failure while opening the connection to the device.
    #[error("failed to reach device at {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Request/response exchange failed after the connection was open.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The device responded but the payload was not valid JSON.
    #[error("status payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload parsed as JSON but not into the expected envelope shape.
    #[error("unexpected payload shape: {0}")]
    MalformedPayload(&'static str),

    /// The device returned an empty payload for a status query.
    #[error("device returned an empty status payload")]
    EmptyPayload,
}
