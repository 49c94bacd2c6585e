//! Domain layer of the Ownabee portal client.
//!
//! Holds the models exchanged with the remote API, the session snapshot and
//! its pure projections, the transfer selection state machine, and the
//! seams (`Transport`, `SessionStorage`) the outer crates implement.

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod portal;
pub mod session;
pub mod transfer;

// Re-export common error type
pub use error::{PortalError, Result};
