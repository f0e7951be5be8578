//! Access policy: the complete permission matrix.
//!
//! Every decision is a pure function over (identity, intended action):
//! - No IO
//! - No panics
//! - No business logic beyond the matrix itself
//!
//! The `can_*` predicates answer allow/deny; the `authorize_*` wrappers turn
//! a denial into [`DomainError::Unauthorized`] naming the attempted action,
//! so a denied check never silently no-ops.

use shiptrack_core::{CustomerId, DomainError, DomainResult, TrackingEventKind};

use crate::{Identity, Role};

/// Whether `identity` may create a parcel on behalf of `sender`.
///
/// Admin, customer service and warehouse staff may create for any sender; a
/// customer only for its own account. Drivers never create parcels.
pub fn can_create_parcel(identity: &Identity, sender: CustomerId) -> bool {
    match identity.role() {
        Role::Admin | Role::CustomerService | Role::Warehouse => true,
        Role::Customer => identity.is_bound_to(sender),
        Role::Driver => false,
    }
}

/// Whether `identity` may append a tracking event of `kind`.
///
/// Warehouse staff record warehouse-side transitions, drivers record
/// transport-side transitions (including exceptions), back office records
/// everything. Customers never write to the ledger.
pub fn can_append_tracking_event(identity: &Identity, kind: TrackingEventKind) -> bool {
    match identity.role() {
        Role::Admin | Role::CustomerService => true,
        Role::Warehouse => matches!(
            kind,
            TrackingEventKind::EnterWarehouse
                | TrackingEventKind::ExitWarehouse
                | TrackingEventKind::Sorted
        ),
        Role::Driver => matches!(
            kind,
            TrackingEventKind::LoadedToTruck
                | TrackingEventKind::UnloadedFromTruck
                | TrackingEventKind::InTransit
                | TrackingEventKind::OutForDelivery
                | TrackingEventKind::Delivered
                | TrackingEventKind::Signed
                | TrackingEventKind::Exception
        ),
        Role::Customer => false,
    }
}

/// Whether `identity` may read a parcel whose sender is `sender`.
///
/// Every operational role sees every parcel; a customer only its own.
pub fn can_view_parcel(identity: &Identity, sender: CustomerId) -> bool {
    match identity.role() {
        Role::Admin | Role::CustomerService | Role::Warehouse | Role::Driver => true,
        Role::Customer => identity.is_bound_to(sender),
    }
}

pub fn authorize_create_parcel(identity: &Identity, sender: CustomerId) -> DomainResult<()> {
    if can_create_parcel(identity, sender) {
        Ok(())
    } else {
        Err(DomainError::unauthorized(format!(
            "create parcel for customer {sender}"
        )))
    }
}

pub fn authorize_append_tracking_event(
    identity: &Identity,
    kind: TrackingEventKind,
) -> DomainResult<()> {
    if can_append_tracking_event(identity, kind) {
        Ok(())
    } else {
        Err(DomainError::unauthorized(format!(
            "append tracking event {kind:?}"
        )))
    }
}

pub fn authorize_view_parcel(identity: &Identity, sender: CustomerId) -> DomainResult<()> {
    if can_view_parcel(identity, sender) {
        Ok(())
    } else {
        Err(DomainError::unauthorized(format!(
            "view parcel of customer {sender}"
        )))
    }
}
