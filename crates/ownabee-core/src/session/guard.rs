//! Route guarding rule consumed by every protected view.

use super::model::Session;

/// What a protected view should do for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Hydration or initialization still pending.
    Loading,
    /// Initialized without a user.
    RedirectToLogin,
    Render,
}

impl RouteGuard {
    pub fn evaluate(session: &Session) -> Self {
        if !(session.is_hydrated && session.is_initialized) {
            RouteGuard::Loading
        } else if session.user.is_none() {
            RouteGuard::RedirectToLogin
        } else {
            RouteGuard::Render
        }
    }
}
