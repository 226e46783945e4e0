// ── Device client seam ──
//
// The abstract collaborator the session layer is written against.
// `CoapAirClient` is the production implementation; tests substitute
// scripted mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;

/// The untyped key/value bag a device reports as its status.
///
/// Keys are vendor field names (`"name"`, `"type"`, `"pwr"`, `"om"`, ...);
/// values are whatever JSON the device sent. No schema is enforced at this
/// layer.
pub type StatusMap = serde_json::Map<String, serde_json::Value>;

/// A live connection to one air purifier.
#[async_trait]
pub trait AirClient: Send + Sync {
    /// Query the device for its current status snapshot.
    async fn status(&self) -> Result<StatusMap, ApiError>;

    /// Forward a control write (one or more desired field values) to the
    /// device.
    async fn set_values(&self, values: StatusMap) -> Result<(), ApiError>;

    /// The host address this client talks to.
    fn host(&self) -> &str;
}

/// Opens [`AirClient`] connections for a given host address.
///
/// A single call makes exactly one connection attempt — retry scheduling
/// belongs to the caller.
#[async_trait]
pub trait AirClientFactory: Send + Sync {
    async fn connect(&self, host: &str) -> Result<Arc<dyn AirClient>, ApiError>;
}
