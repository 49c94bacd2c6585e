//! Application layer of the Ownabee portal client.
//!
//! Coordinates the API client with durable session storage and holds the
//! stateful workflows callers drive: the session lifecycle and the
//! portfolio transfer wizard.

pub mod session;
pub mod submit_guard;
pub mod transfer;

pub use session::{InitializeOutcome, SessionStore};
pub use submit_guard::{SubmitGuard, SubmitPermit};
pub use transfer::{TransferOutcome, TransferState, TransferWorkflow};
