use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use shiptrack_auth::{
    authorize_append_tracking_event, authorize_create_parcel, authorize_view_parcel,
    can_view_parcel, Identity,
};
use shiptrack_catalog::ServiceType;
use shiptrack_core::{
    Clock, CustomerId, DomainError, DomainResult, Sequence, TrackingEventKind, TrackingNumber,
};
use shiptrack_parties::Customer;

use crate::{NewParcel, NewTrackingEvent, Parcel, TrackingEvent};

/// First tracking number handed out by a fresh ledger.
const TRACKING_NUMBER_SEED: u64 = 100_000_000;

/// In-memory parcel store with an append-only event ledger per parcel.
///
/// All mutations and policy-sensitive reads are gated through the access
/// policy. The clock is injected so event ordering is testable; timestamps
/// are assigned here at append time, never taken from the caller.
///
/// Concurrency: at most one logical writer at a time (reads may run
/// concurrently). The interior `RwLock` keeps concurrent readers safe but is
/// not a substitute for external serialization of writers.
pub struct ParcelLedger {
    parcels: RwLock<HashMap<TrackingNumber, Parcel>>,
    seq: Sequence,
    clock: Arc<dyn Clock>,
}

impl ParcelLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            parcels: RwLock::new(HashMap::new()),
            seq: Sequence::starting_at(TRACKING_NUMBER_SEED),
            clock,
        }
    }

    /// Create a parcel for `sender`, allocate its tracking number and record
    /// the initial pickup event at the sender's address.
    pub fn create_parcel(
        &self,
        identity: &Identity,
        sender: &Customer,
        service_type: &ServiceType,
        new: NewParcel,
    ) -> DomainResult<Parcel> {
        authorize_create_parcel(identity, sender.id)?;
        validate_new_parcel(&new, service_type)?;

        let tracking_number = TrackingNumber::new(self.seq.next());
        let mut parcel = Parcel::new(
            tracking_number,
            sender.clone(),
            service_type.clone(),
            new,
        );
        parcel.push_event(TrackingEvent {
            kind: TrackingEventKind::PickedUp,
            recorded_at: self.clock.now(),
            location: sender.address.clone(),
            truck_id: None,
            warehouse_id: None,
            note: Some("parcel created and picked up".to_string()),
            exception: None,
        });

        let mut parcels = self.write_lock()?;
        if parcels.insert(tracking_number, parcel.clone()).is_some() {
            // Sequence values are never reused, so this cannot happen.
            return Err(DomainError::conflict("tracking number already registered"));
        }

        Ok(parcel)
    }

    /// Append a tracking event to an existing parcel.
    ///
    /// The timestamp is the injected clock's now, clamped so the per-parcel
    /// sequence stays non-decreasing even if the clock regresses. The
    /// exception payload is kept only for `Exception` events.
    pub fn append_event(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
        new: NewTrackingEvent,
    ) -> DomainResult<()> {
        let now = self.clock.now();

        let mut parcels = self.write_lock()?;
        let parcel = parcels
            .get_mut(&tracking_number)
            .ok_or(DomainError::NotFound)?;

        authorize_append_tracking_event(identity, new.kind)?;

        if new.location.trim().is_empty() {
            return Err(DomainError::validation("event location cannot be empty"));
        }

        let recorded_at = match parcel.last_recorded_at() {
            Some(last) => now.max(last),
            None => now,
        };
        let exception = if new.kind == TrackingEventKind::Exception {
            new.exception
        } else {
            None
        };

        parcel.push_event(TrackingEvent {
            kind: new.kind,
            recorded_at,
            location: new.location,
            truck_id: new.truck_id,
            warehouse_id: new.warehouse_id,
            note: new.note,
            exception,
        });

        Ok(())
    }

    /// The parcel's most recent event (`None` only for an empty sequence,
    /// which cannot arise through this ledger).
    pub fn current_status(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Option<TrackingEvent>> {
        let parcels = self.read_lock()?;
        let parcel = view_checked(&parcels, identity, tracking_number)?;
        Ok(parcel.current_status().cloned())
    }

    /// Full event history in append order, oldest first. Returns a snapshot;
    /// the ledger cannot be mutated through it.
    pub fn history(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Vec<TrackingEvent>> {
        let parcels = self.read_lock()?;
        let parcel = view_checked(&parcels, identity, tracking_number)?;
        Ok(parcel.events().to_vec())
    }

    /// Single-parcel lookup. Unlike the collection searches this raises
    /// `Unauthorized` on a cross-customer access instead of hiding the hit.
    pub fn find_by_tracking_number(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Parcel> {
        let parcels = self.read_lock()?;
        view_checked(&parcels, identity, tracking_number).cloned()
    }

    /// All parcels sent by `customer_id` that `identity` may view.
    pub fn find_by_customer(
        &self,
        identity: &Identity,
        customer_id: CustomerId,
    ) -> DomainResult<Vec<Parcel>> {
        self.filtered(identity, |p| p.sender().id == customer_id)
    }

    /// Parcels whose first event date falls within `[from, to]` inclusive.
    /// Parcels without events are skipped.
    pub fn find_by_date_range(
        &self,
        identity: &Identity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<Parcel>> {
        self.filtered(identity, |p| {
            p.first_event_date()
                .is_some_and(|date| date >= from && date <= to)
        })
    }

    /// Parcels with any event recorded on the given truck.
    pub fn find_by_truck(&self, identity: &Identity, truck_id: &str) -> DomainResult<Vec<Parcel>> {
        self.filtered(identity, |p| p.touched_truck(truck_id))
    }

    /// Parcels with any event recorded at the given warehouse.
    pub fn find_by_warehouse(
        &self,
        identity: &Identity,
        warehouse_id: &str,
    ) -> DomainResult<Vec<Parcel>> {
        self.filtered(identity, |p| p.touched_warehouse(warehouse_id))
    }

    /// System-side snapshot of a sender's parcels, not policy-gated. Used by
    /// the billing aggregator, which acts as the operator rather than as a
    /// viewer. Sorted by tracking number.
    pub fn parcels_of_sender(&self, customer_id: CustomerId) -> DomainResult<Vec<Parcel>> {
        let parcels = self.read_lock()?;
        let mut found: Vec<Parcel> = parcels
            .values()
            .filter(|p| p.sender().id == customer_id)
            .cloned()
            .collect();
        found.sort_by_key(|p| p.tracking_number());
        Ok(found)
    }

    /// Collection search: matching parcels the identity may view, silently
    /// excluding the rest. Sorted by tracking number so results never depend
    /// on map iteration order.
    fn filtered(
        &self,
        identity: &Identity,
        predicate: impl Fn(&Parcel) -> bool,
    ) -> DomainResult<Vec<Parcel>> {
        let parcels = self.read_lock()?;
        let mut found: Vec<Parcel> = parcels
            .values()
            .filter(|p| predicate(p) && can_view_parcel(identity, p.sender().id))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.tracking_number());
        Ok(found)
    }

    fn read_lock(
        &self,
    ) -> DomainResult<std::sync::RwLockReadGuard<'_, HashMap<TrackingNumber, Parcel>>> {
        self.parcels
            .read()
            .map_err(|_| DomainError::conflict("parcel store lock poisoned"))
    }

    fn write_lock(
        &self,
    ) -> DomainResult<std::sync::RwLockWriteGuard<'_, HashMap<TrackingNumber, Parcel>>> {
        self.parcels
            .write()
            .map_err(|_| DomainError::conflict("parcel store lock poisoned"))
    }
}

impl core::fmt::Debug for ParcelLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let count = self.parcels.read().map(|p| p.len()).unwrap_or(0);
        f.debug_struct("ParcelLedger").field("parcels", &count).finish()
    }
}

fn validate_new_parcel(new: &NewParcel, service_type: &ServiceType) -> DomainResult<()> {
    for (value, label) in [
        (new.weight_kg, "weight_kg"),
        (new.length_cm, "length_cm"),
        (new.width_cm, "width_cm"),
        (new.height_cm, "height_cm"),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::validation(format!(
                "{label} must be a positive finite number"
            )));
        }
    }
    if !new.declared_value.is_finite() || new.declared_value < 0.0 {
        return Err(DomainError::validation(
            "declared_value must be a non-negative finite number",
        ));
    }
    if !service_type.admits_weight(new.weight_kg) {
        return Err(DomainError::validation(format!(
            "weight {}kg is outside the service type band [{}, {}]kg",
            new.weight_kg, service_type.min_weight_kg, service_type.max_weight_kg
        )));
    }
    Ok(())
}

fn view_checked<'a>(
    parcels: &'a HashMap<TrackingNumber, Parcel>,
    identity: &Identity,
    tracking_number: TrackingNumber,
) -> DomainResult<&'a Parcel> {
    let parcel = parcels.get(&tracking_number).ok_or(DomainError::NotFound)?;
    authorize_view_parcel(identity, parcel.sender().id)?;
    Ok(parcel)
}
