//! Turns fetched upstream resources into Slack message attachments.
//!
//! Each kind renders as an ordered list of sections ending with a share-link
//! block that names the user who ran the command.

pub mod badge;
pub mod case;
pub mod collection;
pub mod links;
pub mod message;
pub mod text;
pub mod user;

pub use case::format_case;
pub use collection::format_collection;
pub use message::{Attachment, Field, ResponseType, SlackMessage};
pub use user::format_user;

use caselink_types::Resource;

/// Formats `resource` as the sections of an in-channel message.
#[must_use]
pub fn format(resource: &Resource, acting_user: &str) -> Vec<Attachment> {
    match resource {
        Resource::Case(case) => format_case(case, acting_user),
        Resource::User(user) => format_user(user, acting_user),
        Resource::Collection(collection) => format_collection(collection, acting_user),
    }
}

/// Closing block with a shareable link and the invoking user.
pub(crate) fn share_section(title: &str, link: String, acting_user: &str) -> Attachment {
    Attachment {
        title: Some(title.to_string()),
        text: Some(link),
        color: Some(links::COLOR_LIGHT_BLUE.to_string()),
        footer: Some(format!("posted by @{acting_user}")),
        ..Attachment::default()
    }
}
