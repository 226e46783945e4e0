// ── Device registry ──
//
// Explicit host-address → session mapping. The embedding application owns
// the registry's lifetime and passes it by reference; there is no
// process-wide ambient state.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio_util::sync::CancellationToken;

use purifly_api::AirClient;

use crate::coordinator::Coordinator;
use crate::error::CoreError;

/// Everything held for one registered device.
///
/// Cheaply cloneable; entity code looks sessions up and keeps a clone.
#[derive(Clone)]
pub struct DeviceSession {
    client: Arc<dyn AirClient>,
    coordinator: Arc<Coordinator>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession").finish_non_exhaustive()
    }
}

impl DeviceSession {
    pub(crate) fn new(
        client: Arc<dyn AirClient>,
        coordinator: Arc<Coordinator>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            coordinator,
            cancel,
        }
    }

    pub fn client(&self) -> &Arc<dyn AirClient> {
        &self.client
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    /// Stop this session's background polling.
    pub(crate) fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Registry of active device sessions, keyed by host address.
///
/// Invariant: at most one session per host. Slots are independent —
/// concurrent setup of distinct hosts never interferes.
#[derive(Default)]
pub struct DeviceRegistry {
    sessions: DashMap<String, DeviceSession>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session for `host`. Fails with
    /// [`CoreError::AlreadyRegistered`] if a session exists; the existing
    /// session is left untouched.
    pub(crate) fn insert(&self, host: String, session: DeviceSession) -> Result<(), CoreError> {
        match self.sessions.entry(host) {
            Entry::Occupied(occupied) => Err(CoreError::AlreadyRegistered(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(session);
                Ok(())
            }
        }
    }

    /// Remove and return the session for `host`. Absent keys are a no-op
    /// returning `None` — teardown is idempotent.
    pub(crate) fn remove(&self, host: &str) -> Option<DeviceSession> {
        self.sessions.remove(host).map(|(_, session)| session)
    }

    /// Look up the session for `host` (cheap clone). Never blocks.
    pub fn get(&self, host: &str) -> Option<DeviceSession> {
        self.sessions.get(host).map(|entry| entry.value().clone())
    }

    /// Like [`get`](Self::get), but absent hosts are an error. For callers
    /// that require a registered device (entity code forwarding commands).
    pub fn session(&self, host: &str) -> Result<DeviceSession, CoreError> {
        self.get(host)
            .ok_or_else(|| CoreError::DeviceNotRegistered(host.to_owned()))
    }

    pub fn contains(&self, host: &str) -> bool {
        self.sessions.contains_key(host)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Host addresses of all registered sessions.
    pub fn hosts(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use purifly_api::{ApiError, StatusMap};

    use super::*;

    struct FixedClient(String);

    #[async_trait]
    impl AirClient for FixedClient {
        async fn status(&self) -> Result<StatusMap, ApiError> {
            Ok(StatusMap::new())
        }
        async fn set_values(&self, _values: StatusMap) -> Result<(), ApiError> {
            Ok(())
        }
        fn host(&self) -> &str {
            &self.0
        }
    }

    fn session(host: &str) -> DeviceSession {
        let client: Arc<dyn AirClient> = Arc::new(FixedClient(host.to_owned()));
        let coordinator = Arc::new(Coordinator::new(
            Arc::clone(&client),
            Duration::from_secs(5),
        ));
        DeviceSession::new(client, coordinator, CancellationToken::new())
    }

    #[test]
    fn insert_then_get() {
        let registry = DeviceRegistry::new();
        registry.insert("10.0.0.1".into(), session("10.0.0.1")).unwrap();

        assert_eq!(registry.len(), 1);
        let found = registry.get("10.0.0.1").unwrap();
        assert_eq!(found.client().host(), "10.0.0.1");
    }

    #[test]
    fn double_insert_is_rejected_and_keeps_existing() {
        let registry = DeviceRegistry::new();
        registry.insert("10.0.0.1".into(), session("10.0.0.1")).unwrap();

        let err = registry.insert("10.0.0.1".into(), session("10.0.0.1")).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyRegistered(host) if host == "10.0.0.1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn session_lookup_errors_for_unknown_host() {
        let registry = DeviceRegistry::new();
        let err = registry.session("10.0.0.1").unwrap_err();
        assert!(matches!(err, CoreError::DeviceNotRegistered(host) if host == "10.0.0.1"));
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = DeviceRegistry::new();
        registry.insert("10.0.0.1".into(), session("10.0.0.1")).unwrap();

        assert!(registry.remove("10.0.0.1").is_some());
        assert!(registry.remove("10.0.0.1").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn slots_are_independent() {
        let registry = DeviceRegistry::new();
        registry.insert("10.0.0.1".into(), session("10.0.0.1")).unwrap();
        registry.insert("10.0.0.2".into(), session("10.0.0.2")).unwrap();

        registry.remove("10.0.0.1");
        assert!(registry.get("10.0.0.1").is_none());
        assert!(registry.get("10.0.0.2").is_some());

        let mut hosts = registry.hosts();
        hosts.sort();
        assert_eq!(hosts, vec!["10.0.0.2".to_owned()]);
    }
}
