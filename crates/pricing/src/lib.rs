//! `shiptrack-pricing` — deterministic shipment charge calculation.
//!
//! Pure functions only: no state, no I/O, no clock. Currency rounding is a
//! presentation concern and deliberately absent here.

use shiptrack_catalog::PricingRule;
use shiptrack_tracking::{Parcel, ParcelFlags};

/// A parcel is oversize when any single dimension exceeds this, in cm.
pub const OVERSIZE_LIMIT_CM: f64 = 100.0;

/// Charge for shipping `parcel` over `distance_km`, using the pricing rule
/// of the parcel's own service type.
///
/// All components are additive and independent: a parcel can accrue the
/// dangerous, fragile and oversize surcharges at once.
pub fn charge_for(parcel: &Parcel, distance_km: f64) -> f64 {
    charge(
        &parcel.service_type().pricing,
        parcel.weight_kg(),
        parcel.volume_cubic_meters(),
        [parcel.length_cm(), parcel.width_cm(), parcel.height_cm()],
        parcel.flags(),
        distance_km,
    )
}

/// Rate-card application over raw physical attributes.
pub fn charge(
    rule: &PricingRule,
    weight_kg: f64,
    volume_m3: f64,
    dimensions_cm: [f64; 3],
    flags: ParcelFlags,
    distance_km: f64,
) -> f64 {
    let mut amount = rule.base_price
        + rule.price_per_km * distance_km
        + rule.price_per_kg * weight_kg
        + rule.price_per_cubic_meter * volume_m3;

    if flags.dangerous_goods {
        amount += rule.dangerous_surcharge;
    }
    if flags.fragile {
        amount += rule.fragile_surcharge;
    }
    if dimensions_cm.iter().any(|&d| d > OVERSIZE_LIMIT_CM) {
        amount += rule.oversize_surcharge;
    }

    amount
}
