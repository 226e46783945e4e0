// ── CoAP transport ──
//
// Thin wrapper over the external `coap` crate. Framing, retransmission,
// and message-id handling all live in that library; this module only knows
// the device resource paths and the payload envelope.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use coap::UdpCoAPClient;
use coap_lite::{CoapRequest, RequestType};
use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{AirClient, AirClientFactory, StatusMap};
use crate::error::ApiError;
use crate::payload;

/// Default CoAP UDP port used when the host address carries no port.
pub const DEFAULT_COAP_PORT: u16 = 5683;

const STATUS_PATH: &str = "/sys/dev/status";
const CONTROL_PATH: &str = "/sys/dev/control";

/// Production [`AirClient`] backed by a UDP CoAP socket to one device.
pub struct CoapAirClient {
    host: String,
    // The underlying client is not required to be shareable across
    // concurrent exchanges; requests to one device are serialized.
    inner: Mutex<UdpCoAPClient>,
}

impl CoapAirClient {
    /// Open a socket to `host` and wrap it. Exactly one attempt is made.
    pub async fn connect(host: &str) -> Result<Self, ApiError> {
        let target = split_host_port(host);
        debug!(host, "opening CoAP client");

        let inner = UdpCoAPClient::new_udp(target)
            .await
            .map_err(|source| ApiError::Connect {
                host: host.to_owned(),
                source,
            })?;

        Ok(Self {
            host: host.to_owned(),
            inner: Mutex::new(inner),
        })
    }

    async fn exchange(
        &self,
        method: RequestType,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut request: CoapRequest<SocketAddr> = CoapRequest::new();
        request.set_method(method);
        request.set_path(path);
        if let Some(body) = body {
            request.message.payload = body;
        }

        debug!(host = %self.host, path, "CoAP exchange");
        let response = self.inner.lock().await.send(request).await?;
        Ok(response.message.payload)
    }
}

#[async_trait]
impl AirClient for CoapAirClient {
    async fn status(&self) -> Result<StatusMap, ApiError> {
        let raw = self.exchange(RequestType::Get, STATUS_PATH, None).await?;
        payload::decode_status(&raw)
    }

    async fn set_values(&self, values: StatusMap) -> Result<(), ApiError> {
        let body = payload::encode_control(&values);
        self.exchange(RequestType::Post, CONTROL_PATH, Some(body))
            .await?;
        Ok(())
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Factory producing [`CoapAirClient`] connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoapClientFactory;

#[async_trait]
impl AirClientFactory for CoapClientFactory {
    async fn connect(&self, host: &str) -> Result<Arc<dyn AirClient>, ApiError> {
        let client = CoapAirClient::connect(host).await?;
        Ok(Arc::new(client))
    }
}

/// Split `host[:port]` into a socket-address pair, defaulting the CoAP port.
///
/// Bare IPv6 addresses (more than one `:`, no brackets) are passed through
/// with the default port.
fn split_host_port(host: &str) -> (String, u16) {
    if let Some((name, port)) = host.rsplit_once(':') {
        if !name.contains(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (name.to_owned(), port);
            }
        }
    }
    (host.trim_matches(['[', ']']).to_owned(), DEFAULT_COAP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_plain_host_uses_default_port() {
        assert_eq!(
            split_host_port("192.168.1.50"),
            ("192.168.1.50".to_owned(), DEFAULT_COAP_PORT)
        );
    }

    #[test]
    fn split_host_with_explicit_port() {
        assert_eq!(
            split_host_port("purifier.local:5684"),
            ("purifier.local".to_owned(), 5684)
        );
    }

    #[test]
    fn split_bare_ipv6_keeps_default_port() {
        assert_eq!(
            split_host_port("fe80::1"),
            ("fe80::1".to_owned(), DEFAULT_COAP_PORT)
        );
    }
}
