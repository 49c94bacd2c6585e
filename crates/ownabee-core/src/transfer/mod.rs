//! Portfolio transfer: request/record models and the selection state machine.

pub mod model;
pub mod selection;

pub use model::{PortfolioTransfer, SourceAction, TransferPortfoliosRequest};
pub use selection::TransferSelection;
