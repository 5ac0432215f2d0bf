//! Public links, badge icons and colours used in formatted messages.

use url::Url;

const WEB_BASE: &str = "https://app.figure1.com";
const IMAGE_BASE: &str = "https://s3.amazonaws.com/static.figure1.com/img/share/";

pub const VERIFIED_BADGE_ICON: &str = "http://i.imgur.com/9eyI61P.jpg";
pub const TOP_CONTRIBUTOR_BADGE_ICON: &str = "http://i.imgur.com/oYpmgwF.jpg";
/// Thumbnail for text-only cases that carry no image.
pub const TEXT_CASE_PLACEHOLDER: &str = "http://i.imgur.com/9Tpmuwk.png";

pub const COLOR_LIGHT_BLUE: &str = "#8bcaf1";
pub const COLOR_RED: &str = "#fd7f8a";

fn share_link(path: &str, key: &str, value: &str) -> String {
    let base = format!("{WEB_BASE}{path}");
    Url::parse_with_params(&base, [(key, value)]).map_or(base, String::from)
}

/// Shareable redirect link to a case.
#[must_use]
pub fn case_link(id: &str) -> String {
    share_link("/rd/image", "imageid", id)
}

/// Share-sized image of a case.
#[must_use]
pub fn case_image_link(id: &str) -> String {
    format!("{IMAGE_BASE}{id}")
}

/// Shareable redirect link to a public profile.
#[must_use]
pub fn user_link(username: &str) -> String {
    share_link("/rd/publicprofile", "username", username)
}

/// Shareable redirect link to a collection.
#[must_use]
pub fn collection_link(id: &str) -> String {
    share_link("/rd/collections", "id", id)
}

/// Thumbnail for a collection item: its share image, or the text-case
/// placeholder when the item has no image.
#[must_use]
pub fn collection_item_thumb(image_href: &str, item_id: &str) -> String {
    if image_href.is_empty() {
        TEXT_CASE_PLACEHOLDER.to_string()
    } else {
        case_image_link(item_id)
    }
}
