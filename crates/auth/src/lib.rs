//! Bearer-token lifecycle for the upstream API.
//!
//! [`login`] holds the request/response shapes of the login endpoint;
//! [`TokenManager`] performs the exchange and swaps the shared token.

pub mod login;
pub mod manager;

pub use manager::TokenManager;
