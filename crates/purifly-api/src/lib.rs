//! Async client layer for network-connected air purifiers speaking CoAP.
//!
//! The crate is split along a deliberate seam:
//!
//! - **[`AirClient`]** / **[`AirClientFactory`]** — the abstract device
//!   collaborator: open a connection to a host, query a status snapshot,
//!   forward control writes. Everything above this crate (coordinator,
//!   registry) is written against these traits so it can be exercised
//!   without a physical device on the network.
//! - **[`CoapAirClient`]** — the concrete transport. Protocol framing is
//!   delegated entirely to the external `coap` crate; this crate only knows
//!   the two device resource paths and the vendor's JSON envelope shape
//!   (`state.reported` on reads, `state.desired` on writes).
//!
//! Status payloads are surfaced as untyped key/value maps. No schema is
//! enforced here — interpreting individual fields is the consumer's job.

pub mod client;
pub mod coap;
pub mod error;
pub mod payload;

pub use client::{AirClient, AirClientFactory, StatusMap};
pub use coap::{CoapAirClient, CoapClientFactory, DEFAULT_COAP_PORT};
pub use error::ApiError;
