//! Sections for a single case.

use crate::{
    badge, links,
    message::Attachment,
    share_section,
    text::{count, join_stats, truncate},
};
use caselink_types::Case;

/// Author, case body, then share link.
#[must_use]
pub fn format_case(case: &Case, acting_user: &str) -> Vec<Attachment> {
    let caption = truncate(&case.caption);

    let mut author = Attachment {
        title: Some(case.author.username.clone()),
        title_link: Some(links::user_link(&case.author.username)),
        fallback: Some(format!("FIGURE 1 CASE: {caption}")),
        ..Attachment::default()
    };
    badge::apply(
        &mut author,
        case.author.top_contributor,
        case.author.verified,
    );

    let body = Attachment {
        thumb_url: Some(links::case_image_link(&case.id)),
        footer: Some(join_stats([
            case.image_views.clone(),
            count(case.vote_count, "stars"),
            count(case.comment_count, "comments"),
            count(case.followers, "followers"),
        ])),
        text: Some(caption),
        ..Attachment::default()
    };

    vec![
        author,
        body,
        share_section("Share case link", links::case_link(&case.id), acting_user),
    ]
}
