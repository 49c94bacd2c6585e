//! Authentication domain: tokens, users and login payloads.

pub mod model;

pub use model::{
    AuthTokens, GoogleLoginRequest, LoginResponse, PinLoginRequest, RefreshRequest, User,
};
