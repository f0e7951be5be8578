//! Tracking-event vocabulary.
//!
//! Lives in the core crate so both the access policy and the ledger can
//! match over the same closed enumeration.

use serde::{Deserialize, Serialize};

/// Kind of a tracking event in a parcel's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingEventKind {
    /// Collected at origin; the first event of every parcel.
    PickedUp,
    LoadedToTruck,
    UnloadedFromTruck,
    EnterWarehouse,
    ExitWarehouse,
    Sorted,
    InTransit,
    OutForDelivery,
    Delivered,
    Signed,
    /// Lost / delayed / damaged; carries an exception classification.
    Exception,
}

impl TrackingEventKind {
    /// All kinds, in lifecycle order. Used by tests and permission audits.
    pub const ALL: [TrackingEventKind; 11] = [
        TrackingEventKind::PickedUp,
        TrackingEventKind::LoadedToTruck,
        TrackingEventKind::UnloadedFromTruck,
        TrackingEventKind::EnterWarehouse,
        TrackingEventKind::ExitWarehouse,
        TrackingEventKind::Sorted,
        TrackingEventKind::InTransit,
        TrackingEventKind::OutForDelivery,
        TrackingEventKind::Delivered,
        TrackingEventKind::Signed,
        TrackingEventKind::Exception,
    ];
}
