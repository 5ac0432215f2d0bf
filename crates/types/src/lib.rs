//! Core types and traits for the caselink workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! slash-command bridge: the error taxonomy, resource kinds and bodies, the
//! shared bearer token, and the fetcher trait the server is written against.

pub mod endpoint;
pub mod error;
pub mod kind;
pub mod resource;
pub mod token;
pub mod traits;

pub use endpoint::endpoint_url;
pub use error::{BridgeError, Result};
pub use kind::ResourceKind;
pub use resource::{
    Case, CaseAuthor, Collection, CollectionAuthor, CollectionEmbedded, CollectionItem, Href,
    ItemLinks, Resource, User,
};
pub use token::{BearerToken, Credential};
pub use traits::ResourceFetcher;
