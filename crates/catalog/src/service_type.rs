use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use shiptrack_core::{DomainError, DomainResult, Sequence, ServiceTypeId};

/// Physical packaging class a service type is sold for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Envelope,
    SmallBox,
    LargeBox,
    Pallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySpeed {
    Standard,
    Express,
    Overnight,
}

/// Rate card for one service type. All components are additive; the pricing
/// engine applies them without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub base_price: f64,
    pub price_per_km: f64,
    pub price_per_kg: f64,
    pub price_per_cubic_meter: f64,
    pub dangerous_surcharge: f64,
    pub fragile_surcharge: f64,
    pub oversize_surcharge: f64,
}

impl PricingRule {
    fn components(&self) -> [(f64, &'static str); 7] {
        [
            (self.base_price, "base_price"),
            (self.price_per_km, "price_per_km"),
            (self.price_per_kg, "price_per_kg"),
            (self.price_per_cubic_meter, "price_per_cubic_meter"),
            (self.dangerous_surcharge, "dangerous_surcharge"),
            (self.fragile_surcharge, "fragile_surcharge"),
            (self.oversize_surcharge, "oversize_surcharge"),
        ]
    }
}

/// A service type: packaging class, admissible weight band, delivery speed
/// and rate card. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: ServiceTypeId,
    pub name: String,
    pub package_type: PackageType,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub speed: DeliverySpeed,
    pub pricing: PricingRule,
}

impl ServiceType {
    /// Whether a parcel of `weight_kg` falls inside this service type's
    /// admissible weight band (inclusive on both ends).
    pub fn admits_weight(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min_weight_kg && weight_kg <= self.max_weight_kg
    }
}

/// Input for creating a service type; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServiceType {
    pub name: String,
    pub package_type: PackageType,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub speed: DeliverySpeed,
    pub pricing: PricingRule,
}

/// In-memory service-type store. Create and lookup only.
#[derive(Debug)]
pub struct ServiceTypeCatalog {
    service_types: RwLock<HashMap<ServiceTypeId, ServiceType>>,
    seq: Sequence,
}

impl Default for ServiceTypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceTypeCatalog {
    pub fn new() -> Self {
        Self {
            service_types: RwLock::new(HashMap::new()),
            seq: Sequence::starting_at(1),
        }
    }

    pub fn create(&self, new: NewServiceType) -> DomainResult<ServiceType> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("service type name cannot be empty"));
        }
        if new.min_weight_kg < 0.0 {
            return Err(DomainError::validation("min_weight_kg cannot be negative"));
        }
        if new.max_weight_kg < new.min_weight_kg {
            return Err(DomainError::validation(
                "max_weight_kg cannot be below min_weight_kg",
            ));
        }
        for (value, label) in new.pricing.components() {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::validation(format!(
                    "{label} must be a non-negative finite number"
                )));
            }
        }

        let service_type = ServiceType {
            id: ServiceTypeId::new(self.seq.next()),
            name: new.name,
            package_type: new.package_type,
            min_weight_kg: new.min_weight_kg,
            max_weight_kg: new.max_weight_kg,
            speed: new.speed,
            pricing: new.pricing,
        };

        let mut service_types = self
            .service_types
            .write()
            .map_err(|_| DomainError::conflict("service type store lock poisoned"))?;
        service_types.insert(service_type.id, service_type.clone());

        Ok(service_type)
    }

    pub fn get(&self, id: ServiceTypeId) -> DomainResult<ServiceType> {
        let service_types = self
            .service_types
            .read()
            .map_err(|_| DomainError::conflict("service type store lock poisoned"))?;
        service_types.get(&id).cloned().ok_or(DomainError::NotFound)
    }
}
