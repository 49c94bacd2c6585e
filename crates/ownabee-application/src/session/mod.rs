//! Session lifecycle: hydrate → initialize → authenticate.

mod store;

pub use store::{InitializeOutcome, SessionStore};
