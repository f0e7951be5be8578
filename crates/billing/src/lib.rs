//! `shiptrack-billing` — periodic billing over the parcel ledger.
//!
//! One billing record per invocation, for one customer over one date window.
//! Records are immutable once generated and kept in a per-process history.

pub mod aggregator;
pub mod record;

pub use aggregator::{BillingAggregator, DEFAULT_DISTANCE_KM};
pub use record::{BillingItem, BillingRecord, PaymentMethod};
