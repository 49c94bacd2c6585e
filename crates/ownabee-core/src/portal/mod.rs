//! Portal role memberships ("portal info").

pub mod model;

pub use model::{InstitutionMembership, InstitutionRole, PortalInfo, PortalMe};
