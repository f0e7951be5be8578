use serde::{Deserialize, Serialize};

/// Role of an authenticated caller.
///
/// Roles are a closed enumeration rather than opaque strings: the permission
/// matrix in [`crate::policy`] matches exhaustively over them, so adding a
/// role forces every gating decision to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    CustomerService,
    Warehouse,
    Driver,
    /// Customer-scoped role; always bound to one customer account.
    Customer,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::CustomerService => "customer_service",
            Role::Warehouse => "warehouse",
            Role::Driver => "driver",
            Role::Customer => "customer",
        };
        f.write_str(name)
    }
}
