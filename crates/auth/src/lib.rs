//! `shiptrack-auth` — caller identity and access policy.
//!
//! Authentication (login, password hashing, sessions) is out of scope: this
//! crate starts from an already-established [`Identity`] and answers pure
//! allow/deny questions about it. The full permission matrix lives in
//! [`policy`] so it stays auditable in one place instead of being re-derived
//! per call site.

pub mod identity;
pub mod policy;
pub mod roles;

pub use identity::Identity;
pub use policy::{
    authorize_append_tracking_event, authorize_create_parcel, authorize_view_parcel,
    can_append_tracking_event, can_create_parcel, can_view_parcel,
};
pub use roles::Role;
