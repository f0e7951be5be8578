//! `shiptrack-tracking` — parcels and their append-only tracking ledger.
//!
//! A parcel's event sequence grows monotonically and is never reordered or
//! deleted; "current status" is always the last appended event. Every
//! mutation and every read that could expose another customer's data goes
//! through the access policy in `shiptrack-auth`.

pub mod event;
pub mod ledger;
pub mod parcel;

pub use event::{ExceptionType, NewTrackingEvent, TrackingEvent};
pub use ledger::ParcelLedger;
pub use parcel::{NewParcel, Parcel, ParcelFlags};
