//! `shiptrack-catalog` — service types and their pricing rules.
//!
//! Service types are immutable after creation and referenced (not owned) by
//! parcels.

pub mod service_type;

pub use service_type::{
    DeliverySpeed, NewServiceType, PackageType, PricingRule, ServiceType, ServiceTypeCatalog,
};
