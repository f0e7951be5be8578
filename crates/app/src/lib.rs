//! `shiptrack-app` — the operation-level facade over the core.
//!
//! Wires the customer directory, service-type catalog, parcel ledger and
//! billing aggregator into one service exposing the full operation surface.
//! Front-ends (CLI, menu, HTTP) sit on top of this crate and supply the
//! caller's [`shiptrack_auth::Identity`] per call.

pub mod service;

pub use service::Logistics;
