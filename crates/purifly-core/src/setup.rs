// ── Setup / teardown lifecycle ──
//
// One setup call makes exactly one connection attempt and one first
// refresh. Any failure before registration surfaces as `NotReady` and
// leaves nothing behind; the host application owns retry scheduling.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use purifly_api::AirClientFactory;

use crate::config::{DeviceConfig, PollSettings};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::platform::{Platform, PlatformForwarder};
use crate::registry::{DeviceRegistry, DeviceSession};

/// Set up one device: connect, perform the first refresh, register the
/// session, start periodic polling, and request entity creation.
///
/// Connect and first-refresh failures are treated identically: a warning
/// is logged and [`CoreError::NotReady`] is returned, with no registry
/// entry created. Entity forwarding is spawned fire-and-forget; see
/// [`PlatformForwarder`] for the ordering contract.
pub async fn setup_device(
    registry: &DeviceRegistry,
    settings: &PollSettings,
    config: &DeviceConfig,
    factory: &dyn AirClientFactory,
    forwarder: &Arc<dyn PlatformForwarder>,
) -> Result<(), CoreError> {
    let host = config.host.as_str();
    debug!(host, "setting up purifier device");

    let connect_timeout = settings.connect_timeout();
    let client = match tokio::time::timeout(connect_timeout, factory.connect(host)).await {
        Ok(Ok(client)) => client,
        Ok(Err(error)) => {
            warn!(host, %error, "failed to connect");
            return Err(CoreError::not_ready(host, error));
        }
        Err(_) => {
            warn!(host, timeout = ?connect_timeout, "connection attempt timed out");
            return Err(CoreError::not_ready(
                host,
                CoreError::Timeout {
                    operation: "device connect",
                    timeout: connect_timeout,
                },
            ));
        }
    };

    let coordinator = Arc::new(Coordinator::new(
        Arc::clone(&client),
        settings.refresh_timeout(),
    ));

    // First refresh, awaited. Failure here gets the same treatment as a
    // connect failure: the host reschedules setup.
    if let Err(error) = coordinator.refresh().await {
        warn!(host, %error, "first status refresh failed");
        return Err(CoreError::not_ready(host, error));
    }

    let cancel = CancellationToken::new();
    let session = DeviceSession::new(client, Arc::clone(&coordinator), cancel.clone());
    registry.insert(host.to_owned(), session)?;

    tokio::spawn(Arc::clone(&coordinator).poll_task(settings.poll_interval(), cancel));

    for platform in Platform::ALL {
        let forwarder = Arc::clone(forwarder);
        let host = host.to_owned();
        let platform = *platform;
        tokio::spawn(async move {
            forwarder.forward(&host, platform).await;
        });
    }

    debug!(host, "device registered");
    Ok(())
}

/// Tear down the session for `host`.
///
/// The registry entry is claimed first so concurrent teardowns stay
/// idempotent; entity removal is then awaited for each platform kind
/// before the poll task is cancelled. Returns whether a session existed.
pub async fn teardown_device(
    registry: &DeviceRegistry,
    host: &str,
    forwarder: &Arc<dyn PlatformForwarder>,
) -> bool {
    let Some(session) = registry.remove(host) else {
        debug!(host, "teardown for unregistered host is a no-op");
        return false;
    };

    for platform in Platform::ALL {
        forwarder.unforward(host, *platform).await;
    }

    session.shutdown();
    debug!(host, "device unregistered");
    true
}
