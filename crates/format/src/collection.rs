//! Sections for a collection and a preview of its first items.

use crate::{
    badge, links,
    message::Attachment,
    share_section,
    text::{count, join_stats, truncate},
};
use caselink_types::{Collection, CollectionItem};

/// Items previewed below the collection summary.
pub const MAX_PREVIEW_ITEMS: usize = 3;

fn size_label(size: u64) -> String {
    if size == 1 {
        "1 case".to_string()
    } else {
        format!("{size} cases")
    }
}

fn item_section(item: &CollectionItem) -> Attachment {
    Attachment {
        color: Some(links::COLOR_RED.to_string()),
        text: Some(truncate(&item.caption)),
        thumb_url: Some(links::collection_item_thumb(&item.links.image.href, &item.id)),
        footer: Some(join_stats([
            count(item.vote_count, "stars"),
            count(item.comment_count, "comments"),
            count(item.followers, "followers"),
        ])),
        ..Attachment::default()
    }
}

/// Author, summary, up to [`MAX_PREVIEW_ITEMS`] items, then share link.
///
/// A collection without embedded authors gets no author section.
#[must_use]
pub fn format_collection(collection: &Collection, acting_user: &str) -> Vec<Attachment> {
    let embedded = &collection.embedded;
    let mut sections = Vec::with_capacity(embedded.items.len().min(MAX_PREVIEW_ITEMS) + 3);

    if let Some(author) = embedded.authors.first() {
        let mut section = Attachment {
            author_name: Some(author.username.clone()),
            author_link: Some(links::user_link(&author.username)),
            ..Attachment::default()
        };
        badge::apply(&mut section, author.top_contributor, author.verified);
        sections.push(section);
    }

    sections.push(Attachment {
        title: Some(collection.title.clone()),
        fallback: Some(format!("FIGURE 1 COLLECTION: {}", collection.title)),
        text: Some(truncate(&collection.description)),
        footer: Some(size_label(collection.size)),
        ..Attachment::default()
    });

    sections.extend(
        embedded
            .items
            .iter()
            .take(MAX_PREVIEW_ITEMS)
            .map(item_section),
    );

    sections.push(share_section(
        "Share collection link",
        links::collection_link(&collection.id),
        acting_user,
    ));
    sections
}
