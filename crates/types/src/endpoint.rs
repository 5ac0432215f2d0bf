//! Upstream URL construction.

use crate::{BridgeError, error::Result};
use url::Url;

/// Appends `segments` to the path of `base`, percent-encoding each one.
///
/// A trailing slash on `base` is ignored, so `https://host/s` and
/// `https://host/s/` produce the same endpoint.
///
/// # Errors
///
/// Returns [`BridgeError::Config`] if `base` is not an absolute URL that can
/// carry a path.
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| BridgeError::Config(format!("invalid base url {base:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| BridgeError::Config(format!("base url {base:?} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
