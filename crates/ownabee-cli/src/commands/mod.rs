pub mod auth;
pub mod context;
pub mod list;
pub mod transfer;
