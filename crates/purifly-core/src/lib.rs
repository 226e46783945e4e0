//! Session layer between `purifly-api` and an embedding host application.
//!
//! This crate owns the recurring logic of keeping purifier devices usable:
//!
//! - **[`Coordinator`]** — holds the latest status snapshot for one device
//!   and refreshes it, once synchronously during setup and periodically
//!   afterwards. Reads ([`Coordinator::status`]) never block and never
//!   observe a partial snapshot.
//!
//! - **[`DeviceRegistry`]** — explicit host-address → [`DeviceSession`]
//!   mapping with defined insert/lookup/remove semantics. Its lifetime is
//!   the embedding application's to manage; there is no ambient global
//!   state.
//!
//! - **[`setup_device`] / [`teardown_device`]** — the bootstrap lifecycle.
//!   A setup failure (connect or first refresh) surfaces as
//!   [`CoreError::NotReady`], the signal for the host to reschedule setup
//!   later; nothing is registered in that case. Teardown is idempotent.
//!
//! - **[`PlatformForwarder`]** — the seam through which the host is asked
//!   to create or remove entities (currently one [`Platform::Fan`] per
//!   device). Forwarding is spawned fire-and-forget from setup: setup
//!   returning success does not guarantee entities exist yet.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod platform;
pub mod registry;
pub mod setup;
pub mod status;

pub use config::{DeviceConfig, PollSettings};
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use platform::{Platform, PlatformForwarder};
pub use registry::{DeviceRegistry, DeviceSession};
pub use setup::{setup_device, teardown_device};
pub use status::{DeviceInfo, StatusSnapshot};
