//! Strongly-typed identifiers used across the domain.
//!
//! Unlike UUID-style identifiers, every id in this system is allocated from a
//! per-process monotonic sequence: numeric ids for customers and service
//! types, prefixed decimal strings for tracking numbers (`T100000000`, ...)
//! and billing records (`B1`, ...). Sequences never reuse a value, even
//! though deletion is out of scope anyway.

use core::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a customer account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u64);

/// Identifier of a service type (pricing catalog entry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTypeId(u64);

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_numeric_id!(CustomerId, "CustomerId");
impl_numeric_id!(ServiceTypeId, "ServiceTypeId");

/// Parcel tracking number: `"T"` followed by a monotonically increasing
/// decimal integer (first allocation is `T100000000`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TrackingNumber(u64);

/// Billing record id: `"B"` followed by a monotonically increasing decimal
/// integer (first allocation is `B1`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BillingRecordId(u64);

macro_rules! impl_prefixed_id {
    ($t:ty, $prefix:literal, $name:literal) => {
        impl $t {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }

            pub const fn prefix() -> &'static str {
                $prefix
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.to_string()
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix($prefix).ok_or_else(|| {
                    DomainError::invalid_id(format!("{}: missing '{}' prefix", $name, $prefix))
                })?;
                let value = digits
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_prefixed_id!(TrackingNumber, "T", "TrackingNumber");
impl_prefixed_id!(BillingRecordId, "B", "BillingRecordId");

/// Monotonic per-process id allocator.
///
/// Values are handed out starting at the seed and never repeat. Allocation is
/// lock-free; callers still serialize the surrounding store mutation.
#[derive(Debug)]
pub struct Sequence {
    next: AtomicU64,
}

impl Sequence {
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Allocate the next value.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_number_formats_with_prefix() {
        let tn = TrackingNumber::new(100_000_000);
        assert_eq!(tn.to_string(), "T100000000");
    }

    #[test]
    fn tracking_number_round_trips_through_from_str() {
        let tn: TrackingNumber = "T100000042".parse().unwrap();
        assert_eq!(tn, TrackingNumber::new(100_000_042));
    }

    #[test]
    fn tracking_number_rejects_missing_prefix() {
        let err = "100000042".parse::<TrackingNumber>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn tracking_number_rejects_non_numeric_suffix() {
        let err = "Tabc".parse::<TrackingNumber>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn billing_record_id_formats_with_prefix() {
        assert_eq!(BillingRecordId::new(1).to_string(), "B1");
    }

    #[test]
    fn sequence_is_monotonic_and_never_reuses() {
        let seq = Sequence::starting_at(100_000_000);
        let a = seq.next();
        let b = seq.next();
        let c = seq.next();
        assert_eq!(a, 100_000_000);
        assert!(a < b && b < c);
    }

    #[test]
    fn serde_uses_prefixed_string_form() {
        let tn = TrackingNumber::new(100_000_001);
        let json = serde_json::to_string(&tn).unwrap();
        assert_eq!(json, "\"T100000001\"");
        let back: TrackingNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tn);
    }
}
