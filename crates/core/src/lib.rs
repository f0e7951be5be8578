//! `shiptrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the error model, the tracking-event vocabulary, and the
//! injected clock capability.

pub mod clock;
pub mod error;
pub mod event_kind;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use event_kind::TrackingEventKind;
pub use id::{BillingRecordId, CustomerId, Sequence, ServiceTypeId, TrackingNumber};
