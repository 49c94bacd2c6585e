//! Client session: snapshot model, durable storage seam, route guarding
//! and role-derived capabilities.

pub mod capability;
pub mod guard;
pub mod model;
pub mod storage;

pub use capability::{
    accessible_institution_ids, can_manage_portfolios, has_institution_access,
    is_institution_admin, is_operator,
};
pub use guard::RouteGuard;
pub use model::{PersistedSession, Session};
pub use storage::SessionStorage;
