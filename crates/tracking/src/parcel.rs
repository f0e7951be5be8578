use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shiptrack_catalog::ServiceType;
use shiptrack_core::TrackingNumber;
use shiptrack_parties::Customer;

use crate::TrackingEvent;

/// Special-handling flags set at parcel creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelFlags {
    pub dangerous_goods: bool,
    pub fragile: bool,
    pub international: bool,
}

/// Caller-supplied physical attributes of a parcel. The ledger assigns the
/// tracking number and the initial pickup event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub declared_value: f64,
    pub description: String,
    pub flags: ParcelFlags,
}

/// A shipped parcel: immutable physical attributes plus an append-only,
/// chronologically ordered sequence of tracking events.
///
/// The event sequence is private; it grows only through the ledger and is
/// exposed read-only via [`Parcel::events`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    tracking_number: TrackingNumber,
    sender: Customer,
    service_type: ServiceType,
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    declared_value: f64,
    description: String,
    flags: ParcelFlags,
    events: Vec<TrackingEvent>,
}

impl Parcel {
    pub(crate) fn new(
        tracking_number: TrackingNumber,
        sender: Customer,
        service_type: ServiceType,
        new: NewParcel,
    ) -> Self {
        Self {
            tracking_number,
            sender,
            service_type,
            weight_kg: new.weight_kg,
            length_cm: new.length_cm,
            width_cm: new.width_cm,
            height_cm: new.height_cm,
            declared_value: new.declared_value,
            description: new.description,
            flags: new.flags,
            events: Vec::new(),
        }
    }

    pub fn tracking_number(&self) -> TrackingNumber {
        self.tracking_number
    }

    pub fn sender(&self) -> &Customer {
        &self.sender
    }

    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn declared_value(&self) -> f64 {
        self.declared_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flags(&self) -> ParcelFlags {
        self.flags
    }

    pub fn volume_cubic_meters(&self) -> f64 {
        (self.length_cm / 100.0) * (self.width_cm / 100.0) * (self.height_cm / 100.0)
    }

    /// The last appended event, or `None` for an empty sequence. A parcel
    /// created through the ledger always carries at least the pickup event.
    pub fn current_status(&self) -> Option<&TrackingEvent> {
        self.events.last()
    }

    /// Full event history, oldest first. Read-only view.
    pub fn events(&self) -> &[TrackingEvent] {
        &self.events
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// UTC calendar date of the first tracking event (the ship date used by
    /// date-range search and billing selection).
    pub fn first_event_date(&self) -> Option<NaiveDate> {
        self.events.first().map(|e| e.recorded_at.date_naive())
    }

    pub fn touched_truck(&self, truck_id: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.truck_id.as_deref() == Some(truck_id))
    }

    pub fn touched_warehouse(&self, warehouse_id: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.warehouse_id.as_deref() == Some(warehouse_id))
    }

    pub(crate) fn push_event(&mut self, event: TrackingEvent) {
        self.events.push(event);
    }

    /// Timestamp of the most recent event; used by the ledger to keep the
    /// per-parcel sequence non-decreasing.
    pub(crate) fn last_recorded_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.events.last().map(|e| e.recorded_at)
    }
}
