//! Upstream API client.
//!
//! [`ResourceClient`] implements [`ResourceFetcher`](caselink_types::ResourceFetcher)
//! for cases, public profiles and collections, re-authenticating once through
//! the shared [`TokenManager`](caselink_auth::TokenManager) when the bearer
//! token has expired.

pub mod client;
pub mod endpoints;
pub mod http_util;

pub use client::ResourceClient;
pub use endpoints::Endpoints;
pub use http_util::UpstreamHttp;
