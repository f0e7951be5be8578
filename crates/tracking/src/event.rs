use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shiptrack_core::TrackingEventKind;

/// Classification of an [`TrackingEventKind::Exception`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    Lost,
    Delayed,
    Damaged,
}

/// One immutable, timestamped fact about a parcel's transit.
///
/// Events are append-only: once recorded they are never edited, reordered or
/// deleted. The timestamp is assigned by the ledger's clock at append time,
/// never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub kind: TrackingEventKind,
    pub recorded_at: DateTime<Utc>,
    /// Warehouse site / city / street address where the event happened.
    pub location: String,
    pub truck_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub note: Option<String>,
    /// Present exactly when `kind` is [`TrackingEventKind::Exception`].
    pub exception: Option<ExceptionType>,
}

/// Caller-supplied portion of a tracking event. The ledger assigns the
/// timestamp and discards `exception` for non-exception kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrackingEvent {
    pub kind: TrackingEventKind,
    pub location: String,
    pub truck_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub note: Option<String>,
    pub exception: Option<ExceptionType>,
}

impl NewTrackingEvent {
    /// Plain event of `kind` at `location`, no carrier ids or notes.
    pub fn at(kind: TrackingEventKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            truck_id: None,
            warehouse_id: None,
            note: None,
            exception: None,
        }
    }

    pub fn with_truck(mut self, truck_id: impl Into<String>) -> Self {
        self.truck_id = Some(truck_id.into());
        self
    }

    pub fn with_warehouse(mut self, warehouse_id: impl Into<String>) -> Self {
        self.warehouse_id = Some(warehouse_id.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_exception(mut self, exception: ExceptionType) -> Self {
        self.exception = Some(exception);
        self
    }
}
