use std::collections::HashMap;
use std::sync::RwLock;

use shiptrack_core::{CustomerId, DomainError, DomainResult, Sequence};

use crate::{Customer, NewCustomer};

/// In-memory customer store.
///
/// Ids are allocated from a monotonic sequence starting at 1. Reads clone
/// out, so callers never hold a reference into the store.
#[derive(Debug)]
pub struct CustomerDirectory {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    seq: Sequence,
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self {
            customers: RwLock::new(HashMap::new()),
            seq: Sequence::starting_at(1),
        }
    }

    /// Register a new customer and return the created record.
    pub fn create(&self, new: NewCustomer) -> DomainResult<Customer> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if new.address.trim().is_empty() {
            return Err(DomainError::validation("customer address cannot be empty"));
        }

        let customer = Customer {
            id: CustomerId::new(self.seq.next()),
            name: new.name,
            address: new.address,
            phone: new.phone,
            email: new.email,
            customer_type: new.customer_type,
            billing_preference: new.billing_preference,
        };

        let mut customers = self
            .customers
            .write()
            .map_err(|_| DomainError::conflict("customer store lock poisoned"))?;
        customers.insert(customer.id, customer.clone());

        Ok(customer)
    }

    pub fn get(&self, id: CustomerId) -> DomainResult<Customer> {
        let customers = self
            .customers
            .read()
            .map_err(|_| DomainError::conflict("customer store lock poisoned"))?;
        customers.get(&id).cloned().ok_or(DomainError::NotFound)
    }
}
