// ── Host platform seam ──

use async_trait::async_trait;

/// Entity platform kinds a device is exposed through.
///
/// Currently each purifier surfaces as a single fan entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Fan,
}

impl Platform {
    /// All platform kinds forwarded for every registered device.
    pub const ALL: &'static [Self] = &[Self::Fan];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fan => "fan",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by the embedding host application to create and remove
/// entities for a registered device.
///
/// Ordering contract: [`setup_device`](crate::setup_device) spawns
/// `forward` as an independent task and does not await it — setup returning
/// success does not guarantee entities exist yet.
/// [`teardown_device`](crate::teardown_device) awaits `unforward` before
/// the session's polling stops.
#[async_trait]
pub trait PlatformForwarder: Send + Sync {
    async fn forward(&self, host: &str, platform: Platform);
    async fn unforward(&self, host: &str, platform: Platform);
}
