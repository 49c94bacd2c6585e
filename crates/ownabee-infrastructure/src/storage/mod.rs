//! Durable session storage backends.

pub mod atomic_json;
pub mod json_session_storage;
pub mod memory;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use json_session_storage::JsonSessionStorage;
pub use memory::InMemorySessionStorage;
