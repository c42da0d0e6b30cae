//! Session management: login, token decoding, expiry.

mod ports;
mod service;

pub use ports::{AuthGateway, LocalStore};
pub use service::{SessionService, decode_token_claims};
