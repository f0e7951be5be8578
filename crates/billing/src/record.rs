use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shiptrack_core::{BillingRecordId, CustomerId, TrackingNumber};

/// How a billed shipment is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Monthly settlement for contract customers.
    MonthlyAccount,
    Cash,
    CreditCard,
    MobilePay,
    Prepaid,
}

/// One priced shipment inside a billing record. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingItem {
    pub tracking_number: TrackingNumber,
    pub amount: f64,
    pub payment_method: PaymentMethod,
}

/// An immutable, dated aggregation of priced parcels for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    id: BillingRecordId,
    customer_id: CustomerId,
    period_start: NaiveDate,
    period_end: NaiveDate,
    items: Vec<BillingItem>,
}

impl BillingRecord {
    pub(crate) fn new(
        id: BillingRecordId,
        customer_id: CustomerId,
        period_start: NaiveDate,
        period_end: NaiveDate,
        items: Vec<BillingItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            period_start,
            period_end,
            items,
        }
    }

    pub fn id(&self) -> BillingRecordId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    /// Billed shipments, read-only, in tracking-number order.
    pub fn items(&self) -> &[BillingItem] {
        &self.items
    }

    pub fn shipment_count(&self) -> usize {
        self.items.len()
    }

    /// Derived total: the sum of item amounts.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }
}
