use serde::{Deserialize, Serialize};

use shiptrack_core::{CustomerId, DomainError, DomainResult};

use crate::Role;

/// Identity of the caller performing an operation.
///
/// Supplied per call by the (out-of-scope) authentication layer and immutable
/// for its lifetime. Invariant: `customer` is `Some` iff `role` is
/// [`Role::Customer`]. The constructors enforce this, so a policy check never
/// has to consider a half-bound identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    role: Role,
    customer: Option<CustomerId>,
}

impl Identity {
    /// Identity for an operational role (admin, customer service, warehouse,
    /// driver). Rejects [`Role::Customer`], which must be bound to an account.
    pub fn staff(role: Role) -> DomainResult<Self> {
        if role == Role::Customer {
            return Err(DomainError::validation(
                "customer role requires a bound customer account",
            ));
        }
        Ok(Self {
            role,
            customer: None,
        })
    }

    /// Identity for a customer bound to its own account.
    pub fn customer(customer_id: CustomerId) -> Self {
        Self {
            role: Role::Customer,
            customer: Some(customer_id),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The bound customer account, present exactly for [`Role::Customer`].
    pub fn bound_customer(&self) -> Option<CustomerId> {
        self.customer
    }

    /// Whether this identity is a customer bound to `customer_id`.
    pub fn is_bound_to(&self, customer_id: CustomerId) -> bool {
        self.customer == Some(customer_id)
    }
}
