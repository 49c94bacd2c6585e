//! Stateful portfolio transfer wizard.

mod workflow;

pub use workflow::{TransferOutcome, TransferState, TransferWorkflow};
