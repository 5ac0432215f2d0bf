//! Identifier extraction from slash-command text.
//!
//! Turns a raw object ID, username, or any of the upstream's link shapes
//! into the identifier used for the API lookup. Pure, no I/O.

pub mod identifier;

pub use identifier::{OBJECT_ID_LEN, extract, extract_or_err, is_dot_segment};
