use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use shiptrack_billing::{BillingAggregator, BillingRecord, PaymentMethod};
use shiptrack_catalog::{NewServiceType, ServiceType, ServiceTypeCatalog};
use shiptrack_core::{
    Clock, CustomerId, DomainError, DomainResult, ServiceTypeId, SystemClock, TrackingNumber,
};
use shiptrack_auth::Identity;
use shiptrack_parties::{Customer, CustomerDirectory, NewCustomer};
use shiptrack_tracking::{NewParcel, NewTrackingEvent, Parcel, ParcelLedger, TrackingEvent};

/// The assembled logistics core: one instance per process.
///
/// Stores are owned here and only reachable through this facade, so the
/// mutation surface stays exactly the one the stores define (create/append,
/// no update/delete). Billing and record creation follow the original
/// operator workflow and are not identity-gated; every parcel operation is.
pub struct Logistics {
    customers: CustomerDirectory,
    catalog: ServiceTypeCatalog,
    ledger: ParcelLedger,
    billing: BillingAggregator,
}

impl Default for Logistics {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Logistics {
    /// Build the service around an injected clock (tests pass a
    /// `FixedClock`; production uses [`Logistics::default`]).
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            customers: CustomerDirectory::new(),
            catalog: ServiceTypeCatalog::new(),
            ledger: ParcelLedger::new(clock),
            billing: BillingAggregator::new(),
        }
    }

    // ── customers ────────────────────────────────────────────────────────

    pub fn create_customer(&self, new: NewCustomer) -> DomainResult<Customer> {
        let customer = self.customers.create(new)?;
        tracing::info!(customer_id = %customer.id, name = %customer.name, "customer created");
        Ok(customer)
    }

    pub fn get_customer(&self, id: CustomerId) -> DomainResult<Customer> {
        self.customers.get(id)
    }

    // ── service types ────────────────────────────────────────────────────

    pub fn create_service_type(&self, new: NewServiceType) -> DomainResult<ServiceType> {
        let service_type = self.catalog.create(new)?;
        tracing::info!(
            service_type_id = %service_type.id,
            name = %service_type.name,
            "service type created"
        );
        Ok(service_type)
    }

    pub fn get_service_type(&self, id: ServiceTypeId) -> DomainResult<ServiceType> {
        self.catalog.get(id)
    }

    // ── parcels & tracking ───────────────────────────────────────────────

    /// Create a parcel for the given sender/service-type ids. Dangling ids
    /// surface as `NotFound` before any mutation happens.
    pub fn create_parcel(
        &self,
        identity: &Identity,
        sender_id: CustomerId,
        service_type_id: ServiceTypeId,
        new: NewParcel,
    ) -> DomainResult<Parcel> {
        let sender = self.customers.get(sender_id)?;
        let service_type = self.catalog.get(service_type_id)?;
        let result = self.ledger.create_parcel(identity, &sender, &service_type, new);
        match &result {
            Ok(parcel) => tracing::info!(
                tracking_number = %parcel.tracking_number(),
                sender_id = %sender_id,
                "parcel created"
            ),
            Err(DomainError::Unauthorized(action)) => {
                tracing::warn!(role = %identity.role(), action = %action, "denied")
            }
            Err(_) => {}
        }
        result
    }

    pub fn append_tracking_event(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
        new: NewTrackingEvent,
    ) -> DomainResult<()> {
        let kind = new.kind;
        let result = self.ledger.append_event(identity, tracking_number, new);
        match &result {
            Ok(()) => tracing::info!(
                tracking_number = %tracking_number,
                kind = ?kind,
                "tracking event appended"
            ),
            Err(DomainError::Unauthorized(action)) => {
                tracing::warn!(role = %identity.role(), action = %action, "denied")
            }
            Err(_) => {}
        }
        result
    }

    pub fn current_status(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Option<TrackingEvent>> {
        self.ledger.current_status(identity, tracking_number)
    }

    pub fn history(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Vec<TrackingEvent>> {
        self.ledger.history(identity, tracking_number)
    }

    // ── search ───────────────────────────────────────────────────────────

    pub fn find_by_tracking_number(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
    ) -> DomainResult<Parcel> {
        self.ledger.find_by_tracking_number(identity, tracking_number)
    }

    pub fn find_by_customer(
        &self,
        identity: &Identity,
        customer_id: CustomerId,
    ) -> DomainResult<Vec<Parcel>> {
        self.ledger.find_by_customer(identity, customer_id)
    }

    pub fn find_by_date_range(
        &self,
        identity: &Identity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<Parcel>> {
        self.ledger.find_by_date_range(identity, from, to)
    }

    pub fn find_by_truck(&self, identity: &Identity, truck_id: &str) -> DomainResult<Vec<Parcel>> {
        self.ledger.find_by_truck(identity, truck_id)
    }

    pub fn find_by_warehouse(
        &self,
        identity: &Identity,
        warehouse_id: &str,
    ) -> DomainResult<Vec<Parcel>> {
        self.ledger.find_by_warehouse(identity, warehouse_id)
    }

    // ── pricing & billing ────────────────────────────────────────────────

    /// Quote the charge for an existing parcel over `distance_km`. Gated
    /// like any other per-parcel read.
    pub fn calculate_charge(
        &self,
        identity: &Identity,
        tracking_number: TrackingNumber,
        distance_km: f64,
    ) -> DomainResult<f64> {
        let parcel = self.ledger.find_by_tracking_number(identity, tracking_number)?;
        Ok(shiptrack_pricing::charge_for(&parcel, distance_km))
    }

    pub fn generate_billing_record(
        &self,
        customer_id: CustomerId,
        period_start: NaiveDate,
        period_end: NaiveDate,
        distance_overrides: &HashMap<TrackingNumber, f64>,
        default_payment_method: PaymentMethod,
    ) -> DomainResult<BillingRecord> {
        let customer = self.customers.get(customer_id)?;
        let record = self.billing.generate(
            &self.ledger,
            &customer,
            period_start,
            period_end,
            distance_overrides,
            default_payment_method,
        )?;
        tracing::info!(
            record_id = %record.id(),
            customer_id = %customer_id,
            shipments = record.shipment_count(),
            total = record.total_amount(),
            "billing record generated"
        );
        Ok(record)
    }

    pub fn get_billing_history_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> DomainResult<Vec<BillingRecord>> {
        self.billing.history_for_customer(customer_id)
    }
}
