//! Sections for a public profile.

use crate::{
    badge, links,
    message::{Attachment, Field},
    share_section,
    text::{count, join_stats},
};
use caselink_types::User;

/// `"{institution}, {country}"`, preferring the profile country.
fn location(user: &User) -> String {
    let country = if user.profile_country.is_empty() {
        user.country.as_str()
    } else {
        user.profile_country.as_str()
    };
    join_stats([user.institution.as_str(), country])
}

/// Every non-zero profile counter as `"{count} {label}"`.
fn stats(user: &User) -> String {
    join_stats(
        [
            (user.comments_count, "comments"),
            (user.favorites_count, "favorites"),
            (user.followers_count, "followers"),
            (user.following_count, "following"),
            (user.uploads_count, "uploads"),
        ]
        .into_iter()
        .filter(|(n, _)| *n != 0)
        .map(|(n, label)| count(n, label)),
    )
}

/// Identity, biography, then share link.
#[must_use]
pub fn format_user(user: &User, acting_user: &str) -> Vec<Attachment> {
    let mut identity = Attachment {
        title: Some(user.username.clone()),
        title_link: Some(links::user_link(&user.username)),
        text: Some(join_stats([user.category.as_str(), user.specialty.as_str()]))
            .filter(|s| !s.is_empty()),
        ..Attachment::default()
    };
    badge::apply(&mut identity, user.top_contributor, user.verified);

    let mut fields = Vec::new();
    if !user.link.is_empty() {
        fields.push(Field::short("Link", &user.link));
    }
    let location = location(user);
    if !location.is_empty() {
        fields.push(Field::short("Institution/Country", location));
    }

    let biography = Attachment {
        fallback: Some(format!("FIGURE 1 USER: {}", user.username)),
        title: Some(user.full_name.clone()),
        text: Some(user.bio.clone()),
        footer: Some(stats(user)).filter(|s| !s.is_empty()),
        fields,
        ..Attachment::default()
    };

    vec![
        identity,
        biography,
        share_section(
            "Share profile link",
            links::user_link(&user.username),
            acting_user,
        ),
    ]
}
