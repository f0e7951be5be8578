//! `shiptrack-parties` — customer accounts.
//!
//! Customers are immutable once created; the directory supports create and
//! lookup only (no update/delete surface).

pub mod customer;
pub mod directory;

pub use customer::{BillingPreference, Customer, CustomerType, NewCustomer};
pub use directory::CustomerDirectory;
