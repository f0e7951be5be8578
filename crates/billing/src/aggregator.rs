use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use shiptrack_core::{BillingRecordId, CustomerId, DomainError, DomainResult, Sequence, TrackingNumber};
use shiptrack_parties::{BillingPreference, Customer, CustomerType};
use shiptrack_pricing::charge_for;
use shiptrack_tracking::ParcelLedger;

use crate::{BillingItem, BillingRecord, PaymentMethod};

/// Distance assumed for a shipment with no caller-supplied override, in km.
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Produces billing records over the parcel ledger and keeps the per-process
/// billing history. Record ids are `B1`, `B2`, ... and never reused.
#[derive(Debug)]
pub struct BillingAggregator {
    records: RwLock<Vec<BillingRecord>>,
    seq: Sequence,
}

impl Default for BillingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingAggregator {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            seq: Sequence::starting_at(1),
        }
    }

    /// Generate one billing record for `customer` over `[period_start,
    /// period_end]` inclusive.
    ///
    /// A parcel is billed when its first tracking event's date falls inside
    /// the window; parcels with no events are skipped. Distance comes from
    /// `distance_overrides` (keyed by tracking number) or defaults to
    /// [`DEFAULT_DISTANCE_KM`]. Items are ordered by tracking number.
    pub fn generate(
        &self,
        ledger: &ParcelLedger,
        customer: &Customer,
        period_start: NaiveDate,
        period_end: NaiveDate,
        distance_overrides: &HashMap<TrackingNumber, f64>,
        default_payment_method: PaymentMethod,
    ) -> DomainResult<BillingRecord> {
        if period_end < period_start {
            return Err(DomainError::validation(
                "billing period end cannot precede its start",
            ));
        }

        let payment_method = resolve_payment_method(customer, default_payment_method);

        let mut items = Vec::new();
        for parcel in ledger.parcels_of_sender(customer.id)? {
            let Some(ship_date) = parcel.first_event_date() else {
                continue;
            };
            if ship_date < period_start || ship_date > period_end {
                continue;
            }

            let distance_km = distance_overrides
                .get(&parcel.tracking_number())
                .copied()
                .unwrap_or(DEFAULT_DISTANCE_KM);

            items.push(BillingItem {
                tracking_number: parcel.tracking_number(),
                amount: charge_for(&parcel, distance_km),
                payment_method,
            });
        }

        let record = BillingRecord::new(
            BillingRecordId::new(self.seq.next()),
            customer.id,
            period_start,
            period_end,
            items,
        );

        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::conflict("billing history lock poisoned"))?;
        records.push(record.clone());

        Ok(record)
    }

    /// All records previously generated for `customer_id`, in creation order.
    pub fn history_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> DomainResult<Vec<BillingRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::conflict("billing history lock poisoned"))?;
        Ok(records
            .iter()
            .filter(|r| r.customer_id() == customer_id)
            .cloned()
            .collect())
    }
}

/// Resolve how a customer's shipments are settled.
///
/// Customer-type rules outrank billing preferences, which outrank the
/// caller-supplied default:
/// Contract -> MonthlyAccount, Prepaid type -> Prepaid,
/// CashOnDelivery preference -> Cash, Prepaid preference -> Prepaid,
/// otherwise the default.
pub fn resolve_payment_method(customer: &Customer, default: PaymentMethod) -> PaymentMethod {
    match (customer.customer_type, customer.billing_preference) {
        (CustomerType::Contract, _) => PaymentMethod::MonthlyAccount,
        (CustomerType::Prepaid, _) => PaymentMethod::Prepaid,
        (_, BillingPreference::CashOnDelivery) => PaymentMethod::Cash,
        (_, BillingPreference::Prepaid) => PaymentMethod::Prepaid,
        (_, BillingPreference::Monthly) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use shiptrack_auth::{Identity, Role};
    use shiptrack_catalog::{
        DeliverySpeed, NewServiceType, PackageType, PricingRule, ServiceType, ServiceTypeCatalog,
    };
    use shiptrack_core::{Clock, FixedClock};
    use shiptrack_parties::{CustomerDirectory, NewCustomer};
    use shiptrack_tracking::{NewParcel, ParcelFlags};

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap(),
        ))
    }

    fn customer_of(
        directory: &CustomerDirectory,
        name: &str,
        customer_type: CustomerType,
        billing_preference: BillingPreference,
    ) -> Customer {
        directory
            .create(NewCustomer {
                name: name.to_string(),
                address: "Kaohsiung".to_string(),
                phone: "0912".to_string(),
                email: "a@mail.example".to_string(),
                customer_type,
                billing_preference,
            })
            .unwrap()
    }

    fn small_box_service() -> ServiceType {
        ServiceTypeCatalog::new()
            .create(NewServiceType {
                name: "Standard small box".to_string(),
                package_type: PackageType::SmallBox,
                min_weight_kg: 0.0,
                max_weight_kg: 20.0,
                speed: DeliverySpeed::Standard,
                pricing: PricingRule {
                    base_price: 50.0,
                    price_per_km: 2.0,
                    price_per_kg: 10.0,
                    price_per_cubic_meter: 100.0,
                    dangerous_surcharge: 30.0,
                    fragile_surcharge: 20.0,
                    oversize_surcharge: 40.0,
                },
            })
            .unwrap()
    }

    fn plain_parcel() -> NewParcel {
        NewParcel {
            weight_kg: 2.0,
            length_cm: 30.0,
            width_cm: 20.0,
            height_cm: 10.0,
            declared_value: 500.0,
            description: "books".to_string(),
            flags: ParcelFlags::default(),
        }
    }

    fn admin() -> Identity {
        Identity::staff(Role::Admin).unwrap()
    }

    #[test]
    fn contract_customer_always_bills_to_monthly_account() {
        let directory = CustomerDirectory::new();
        let bob = customer_of(
            &directory,
            "Bob",
            CustomerType::Contract,
            BillingPreference::CashOnDelivery,
        );
        let st = small_box_service();
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());
        ledger
            .create_parcel(&admin(), &bob, &st, plain_parcel())
            .unwrap();

        let aggregator = BillingAggregator::new();
        let today = clock.now().date_naive();
        // The caller default must not leak through for a contract customer.
        for default in [PaymentMethod::Cash, PaymentMethod::CreditCard, PaymentMethod::MobilePay] {
            let record = aggregator
                .generate(&ledger, &bob, today, today, &HashMap::new(), default)
                .unwrap();
            assert_eq!(record.items().len(), 1);
            assert_eq!(record.items()[0].payment_method, PaymentMethod::MonthlyAccount);
        }
    }

    #[test]
    fn payment_method_resolution_priority() {
        let directory = CustomerDirectory::new();
        let cases = [
            (
                CustomerType::Contract,
                BillingPreference::Prepaid,
                PaymentMethod::MonthlyAccount,
            ),
            (
                CustomerType::Prepaid,
                BillingPreference::CashOnDelivery,
                PaymentMethod::Prepaid,
            ),
            (
                CustomerType::NonContract,
                BillingPreference::CashOnDelivery,
                PaymentMethod::Cash,
            ),
            (
                CustomerType::NonContract,
                BillingPreference::Prepaid,
                PaymentMethod::Prepaid,
            ),
            (
                CustomerType::NonContract,
                BillingPreference::Monthly,
                PaymentMethod::CreditCard, // falls through to the default
            ),
        ];
        for (customer_type, preference, expected) in cases {
            let customer = customer_of(&directory, "C", customer_type, preference);
            assert_eq!(
                resolve_payment_method(&customer, PaymentMethod::CreditCard),
                expected,
                "{customer_type:?}/{preference:?}"
            );
        }
    }

    #[test]
    fn bills_only_parcels_inside_the_window() {
        let directory = CustomerDirectory::new();
        let alice = customer_of(
            &directory,
            "Alice",
            CustomerType::NonContract,
            BillingPreference::CashOnDelivery,
        );
        let st = small_box_service();
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());

        let billed = ledger
            .create_parcel(&admin(), &alice, &st, plain_parcel())
            .unwrap();
        let day_one = clock.now().date_naive();

        clock.advance(Duration::days(40));
        ledger
            .create_parcel(&admin(), &alice, &st, plain_parcel())
            .unwrap();

        let aggregator = BillingAggregator::new();
        let record = aggregator
            .generate(
                &ledger,
                &alice,
                day_one,
                day_one + Duration::days(30),
                &HashMap::new(),
                PaymentMethod::Cash,
            )
            .unwrap();

        assert_eq!(record.items().len(), 1);
        assert_eq!(record.items()[0].tracking_number, billed.tracking_number());
    }

    #[test]
    fn distance_override_is_honored_per_tracking_number() {
        let directory = CustomerDirectory::new();
        let alice = customer_of(
            &directory,
            "Alice",
            CustomerType::NonContract,
            BillingPreference::CashOnDelivery,
        );
        let st = small_box_service();
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());

        let overridden = ledger
            .create_parcel(&admin(), &alice, &st, plain_parcel())
            .unwrap();
        let defaulted = ledger
            .create_parcel(&admin(), &alice, &st, plain_parcel())
            .unwrap();

        let mut overrides = HashMap::new();
        overrides.insert(overridden.tracking_number(), 100.0);

        let aggregator = BillingAggregator::new();
        let today = clock.now().date_naive();
        let record = aggregator
            .generate(&ledger, &alice, today, today, &overrides, PaymentMethod::Cash)
            .unwrap();

        assert_eq!(record.items().len(), 2);
        let amount_of = |tn| {
            record
                .items()
                .iter()
                .find(|i| i.tracking_number == tn)
                .unwrap()
                .amount
        };
        // 90km more at 2.0/km.
        let diff = amount_of(overridden.tracking_number()) - amount_of(defaulted.tracking_number());
        assert!((diff - 180.0).abs() < 1e-9, "diff = {diff}");
    }

    #[test]
    fn record_ids_are_prefixed_and_sequential() {
        let directory = CustomerDirectory::new();
        let alice = customer_of(
            &directory,
            "Alice",
            CustomerType::NonContract,
            BillingPreference::CashOnDelivery,
        );
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());
        let aggregator = BillingAggregator::new();
        let today = clock.now().date_naive();

        let r1 = aggregator
            .generate(&ledger, &alice, today, today, &HashMap::new(), PaymentMethod::Cash)
            .unwrap();
        let r2 = aggregator
            .generate(&ledger, &alice, today, today, &HashMap::new(), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(r1.id().to_string(), "B1");
        assert_eq!(r2.id().to_string(), "B2");
    }

    #[test]
    fn history_is_per_customer_in_creation_order() {
        let directory = CustomerDirectory::new();
        let alice = customer_of(
            &directory,
            "Alice",
            CustomerType::NonContract,
            BillingPreference::CashOnDelivery,
        );
        let bob = customer_of(
            &directory,
            "Bob",
            CustomerType::Contract,
            BillingPreference::Monthly,
        );
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());
        let aggregator = BillingAggregator::new();
        let today = clock.now().date_naive();

        let a1 = aggregator
            .generate(&ledger, &alice, today, today, &HashMap::new(), PaymentMethod::Cash)
            .unwrap();
        let b1 = aggregator
            .generate(&ledger, &bob, today, today, &HashMap::new(), PaymentMethod::Cash)
            .unwrap();
        let a2 = aggregator
            .generate(&ledger, &alice, today, today, &HashMap::new(), PaymentMethod::Cash)
            .unwrap();

        let alice_history = aggregator.history_for_customer(alice.id).unwrap();
        assert_eq!(alice_history, vec![a1, a2]);
        let bob_history = aggregator.history_for_customer(bob.id).unwrap();
        assert_eq!(bob_history, vec![b1]);
    }

    #[test]
    fn rejects_inverted_period() {
        let directory = CustomerDirectory::new();
        let alice = customer_of(
            &directory,
            "Alice",
            CustomerType::NonContract,
            BillingPreference::CashOnDelivery,
        );
        let clock = fixed_clock();
        let ledger = shiptrack_tracking::ParcelLedger::new(clock.clone());
        let aggregator = BillingAggregator::new();
        let today = clock.now().date_naive();

        let err = aggregator
            .generate(
                &ledger,
                &alice,
                today,
                today - Duration::days(1),
                &HashMap::new(),
                PaymentMethod::Cash,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
