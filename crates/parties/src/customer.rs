use serde::{Deserialize, Serialize};

use shiptrack_core::CustomerId;

/// Commercial relationship with the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Contract customer with a monthly settlement account.
    Contract,
    NonContract,
    /// Shipments paid up front (by a third party or merchant).
    Prepaid,
}

/// How the customer prefers to be billed. Only consulted for non-contract,
/// non-prepaid customer types; see the billing aggregator's resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPreference {
    Monthly,
    CashOnDelivery,
    Prepaid,
}

/// A customer account. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub customer_type: CustomerType,
    pub billing_preference: BillingPreference,
}

/// Input for creating a customer; the directory assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub customer_type: CustomerType,
    pub billing_preference: BillingPreference,
}
