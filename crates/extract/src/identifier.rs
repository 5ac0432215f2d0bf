//! Resolves command text into an upstream identifier.
//!
//! Accepted inputs per kind:
//!
//! | kind       | raw                | in-app link                     | share link                          |
//! |------------|--------------------|---------------------------------|-------------------------------------|
//! | case       | 24-char object id  | `/?image=<id>`, `/images/<id>`  | `/rd/image?imageid=<id>`            |
//! | user       | any username       | `/user/<name>`                  | `/rd/publicprofile?username=<name>` |
//! | collection | 24-char object id  | `/collections/<id>`             | `/rd/collections?id=<id>`           |
//!
//! Usernames are free-form, so the user path never applies the length check
//! and falls back to the input text when it is not a link. A username taken
//! from a link path is percent-decoded; object ids keep the encoded form.

use caselink_types::{BridgeError, ResourceKind, Result};
use percent_encoding::percent_decode_str;
use url::Url;

/// Length of the upstream's hexadecimal object identifiers.
pub const OBJECT_ID_LEN: usize = 24;

/// Query parameters that may carry a case id, highest priority first.
const CASE_QUERY_KEYS: &[&str] = &["imageid", "image"];
const COLLECTION_QUERY_KEYS: &[&str] = &["id"];
const USERNAME_QUERY_KEY: &str = "username";

/// Extracts the identifier for `kind` from `text`.
///
/// Returns `None` when no identifier can be found. For [`ResourceKind::User`]
/// the result may be an empty string (e.g. empty input or a link ending in
/// `/`); callers must reject that themselves, see [`extract_or_err`].
#[must_use]
pub fn extract(kind: ResourceKind, text: &str) -> Option<String> {
    if text.len() == OBJECT_ID_LEN {
        return Some(text.to_string());
    }

    match kind {
        ResourceKind::Case => object_id(text, CASE_QUERY_KEYS),
        ResourceKind::Collection => object_id(text, COLLECTION_QUERY_KEYS),
        ResourceKind::User => Some(username(text)),
    }
}

/// Like [`extract`], but turns a missing or empty identifier into
/// [`BridgeError::IdentifierNotFound`]. The dot segments `.` and `..` are
/// rejected too; they cannot name a resource in a URL path.
///
/// # Errors
///
/// Returns [`BridgeError::IdentifierNotFound`] if nothing usable was found.
pub fn extract_or_err(kind: ResourceKind, text: &str) -> Result<String> {
    extract(kind, text)
        .filter(|id| !id.is_empty() && !is_dot_segment(id))
        .ok_or_else(|| BridgeError::IdentifierNotFound {
            kind,
            input: text.to_string(),
        })
}

/// Parses `text` as an absolute link with a host.
fn parse_link(text: &str) -> Option<Url> {
    Url::parse(text).ok().filter(|url| url.host().is_some())
}

/// First value of query parameter `key`, percent-decoded.
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Last segment of the (still percent-encoded) path.
fn last_segment(url: &Url) -> String {
    url.path().rsplit('/').next().unwrap_or_default().to_string()
}

/// `true` for `.` and `..`, which URL path handling would swallow.
#[must_use]
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

fn is_object_id(candidate: &str) -> bool {
    candidate.len() == OBJECT_ID_LEN
}

fn object_id(text: &str, query_keys: &[&str]) -> Option<String> {
    let Some(url) = parse_link(text) else {
        tracing::debug!(text, "input is neither an object id nor a link");
        return None;
    };

    query_keys
        .iter()
        .filter_map(|key| query_value(&url, key))
        .find(|value| is_object_id(value))
        .or_else(|| Some(last_segment(&url)).filter(|segment| is_object_id(segment)))
}

fn username(text: &str) -> String {
    let Some(url) = parse_link(text) else {
        return text.to_string();
    };
    query_value(&url, USERNAME_QUERY_KEY)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            percent_decode_str(&last_segment(&url))
                .decode_utf8_lossy()
                .into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE_ID: &str = "59076d6324d11b594b2dff1d";
    const COLLECTION_ID: &str = "5907549889c89eef5b1b3511";

    #[test]
    fn test_raw_id_any_kind() {
        for kind in ResourceKind::all() {
            assert_eq!(extract(*kind, CASE_ID).as_deref(), Some(CASE_ID));
        }
    }

    #[test]
    fn test_any_24_char_text_is_returned_verbatim() {
        let inputs = [
            "aaaaaaaaaaaaaaaaaaaaaaaa",
            "https://x.io/?image=abcd",
            "not even close to an id!",
            "                        ",
        ];
        for text in inputs {
            assert_eq!(text.len(), OBJECT_ID_LEN);
            for kind in ResourceKind::all() {
                assert_eq!(extract(*kind, text).as_deref(), Some(text));
            }
        }
    }

    #[test]
    fn test_case_link_shapes() {
        let valid = [
            format!("https://app.figure1.com/?image={CASE_ID}&t=0"),
            format!("https://app.figure1.com/rd/image?imageid={CASE_ID}"),
            format!("https://app.figure1.com/images/{CASE_ID}?imageType=0&t=0"),
            format!("https://host/rd/image?imageid={CASE_ID}"),
        ];
        for text in &valid {
            assert_eq!(
                extract(ResourceKind::Case, text).as_deref(),
                Some(CASE_ID),
                "{text}"
            );
        }
    }

    #[test]
    fn test_case_query_priority() {
        let other = "aaaaaaaaaaaaaaaaaaaaaaaa";
        let text = format!("https://host/x?image={other}&imageid={CASE_ID}");
        assert_eq!(extract(ResourceKind::Case, &text).as_deref(), Some(CASE_ID));
    }

    #[test]
    fn test_case_short_query_falls_back_to_path() {
        let text = format!("https://host/images/{CASE_ID}?imageid=short");
        assert_eq!(extract(ResourceKind::Case, &text).as_deref(), Some(CASE_ID));
    }

    #[test]
    fn test_case_not_found() {
        assert_eq!(extract(ResourceKind::Case, "abcd"), None);
        assert_eq!(extract(ResourceKind::Case, ""), None);
        assert_eq!(extract(ResourceKind::Case, "https://host/images/abcd"), None);
        assert_eq!(extract(ResourceKind::Case, "app.figure1.com/images/x"), None);
    }

    #[test]
    fn test_user_link_shapes() {
        assert_eq!(
            extract(
                ResourceKind::User,
                "https://host/rd/publicprofile?username=ccovic"
            )
            .as_deref(),
            Some("ccovic")
        );
        assert_eq!(
            extract(ResourceKind::User, "https://host/user/richardpenner").as_deref(),
            Some("richardpenner")
        );
        assert_eq!(
            extract(
                ResourceKind::User,
                "https://app.figure1.com/rd/publicprofile?username=ccovic"
            )
            .as_deref(),
            Some("ccovic")
        );
    }

    #[test]
    fn test_user_has_no_length_check() {
        assert_eq!(
            extract(ResourceKind::User, "penguinophile").as_deref(),
            Some("penguinophile")
        );
        assert_eq!(extract(ResourceKind::User, "ab").as_deref(), Some("ab"));
    }

    #[test]
    fn test_user_empty_query_falls_back_to_path() {
        assert_eq!(
            extract(ResourceKind::User, "https://host/user/ccovic?username=").as_deref(),
            Some("ccovic")
        );
    }

    #[test]
    fn test_user_path_segment_is_decoded() {
        assert_eq!(
            extract(ResourceKind::User, "https://app.figure1.com/user/jos%C3%A9").as_deref(),
            Some("jos\u{e9}")
        );
        assert_eq!(
            extract(ResourceKind::User, "https://host/user/dr%20who").as_deref(),
            Some("dr who")
        );
    }

    #[test]
    fn test_object_id_path_segment_stays_encoded() {
        // 24 bytes only while encoded
        let text = "https://host/images/aaaaaaaaaaaaaaaaaaaaa%20";
        assert_eq!(
            extract(ResourceKind::Case, text).as_deref(),
            Some("aaaaaaaaaaaaaaaaaaaaa%20")
        );
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert_eq!(extract(ResourceKind::User, "..").as_deref(), Some(".."));
        for text in ["..", ".", "https://host/user/%2E%2E"] {
            let err = extract_or_err(ResourceKind::User, text).unwrap_err();
            assert!(
                matches!(
                    err,
                    BridgeError::IdentifierNotFound {
                        kind: ResourceKind::User,
                        ..
                    }
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn test_user_empty_input_is_returned_empty() {
        assert_eq!(extract(ResourceKind::User, "").as_deref(), Some(""));
        assert_eq!(
            extract(ResourceKind::User, "https://host/user/").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_collection_link_shapes() {
        let valid = [
            format!("https://app.figure1.com/rd/collections?id={COLLECTION_ID}"),
            format!("https://app.figure1.com/collections/{COLLECTION_ID}"),
            format!("https://host/collections/{COLLECTION_ID}"),
        ];
        for text in &valid {
            assert_eq!(
                extract(ResourceKind::Collection, text).as_deref(),
                Some(COLLECTION_ID),
                "{text}"
            );
        }
    }

    #[test]
    fn test_collection_not_found() {
        assert_eq!(extract(ResourceKind::Collection, "fractures"), None);
        assert_eq!(
            extract(ResourceKind::Collection, "https://host/rd/collections?id=123"),
            None
        );
    }

    #[test]
    fn test_extract_or_err() {
        assert_eq!(
            extract_or_err(ResourceKind::Case, CASE_ID).unwrap(),
            CASE_ID
        );

        let err = extract_or_err(ResourceKind::Case, "abcd").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::IdentifierNotFound {
                kind: ResourceKind::Case,
                ..
            }
        ));

        let err = extract_or_err(ResourceKind::User, "https://host/user/").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::IdentifierNotFound {
                kind: ResourceKind::User,
                ..
            }
        ));
    }
}
