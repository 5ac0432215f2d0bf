//! Upstream resource bodies, reduced to the fields the formatter reads.
//!
//! Every field is defaulted so that partially populated upstream documents
//! still decode; `null` text fields are treated as empty strings.

use crate::{ResourceKind, error::Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Case ─────────────────────────────────────────────────────────────────────

/// Author block embedded in a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseAuthor {
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    pub top_contributor: bool,
    pub verified: bool,
}

/// A single case (image post).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Case {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub caption: String,
    pub is_paging_case: bool,
    /// Pre-formatted view count, e.g. `"1,204 views"`.
    #[serde(deserialize_with = "nullable")]
    pub image_views: String,
    pub followers: u64,
    #[serde(alias = "CommentCount")]
    pub comment_count: u64,
    pub vote_count: u64,
    #[serde(alias = "Author")]
    pub author: CaseAuthor,
}

// ── User ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStrings {
    #[serde(deserialize_with = "nullable")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyCategory {
    pub strings: LabelStrings,
}

/// Nested specialty description as returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyObject {
    pub category: SpecialtyCategory,
    pub strings: LabelStrings,
}

/// A public user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    pub verified: bool,
    pub top_contributor: bool,
    /// Flattened from `specialtyObject.category.strings.label`.
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    /// Flattened from `specialtyObject.strings.label`.
    #[serde(deserialize_with = "nullable")]
    pub specialty: String,

    #[serde(deserialize_with = "nullable")]
    pub country: String,
    #[serde(deserialize_with = "nullable")]
    pub profile_country: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub institution: String,
    #[serde(deserialize_with = "nullable")]
    pub bio: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,

    pub specialty_object: SpecialtyObject,

    #[serde(rename = "profileCommentsCount")]
    pub comments_count: u64,
    #[serde(rename = "profileFavoritesCount")]
    pub favorites_count: u64,
    #[serde(rename = "profileFollowersCount")]
    pub followers_count: u64,
    #[serde(rename = "profileFollowingCount")]
    pub following_count: u64,
    #[serde(rename = "profileUploadsCount")]
    pub uploads_count: u64,
}

impl User {
    /// Copies the nested specialty labels into the flat `category` and
    /// `specialty` fields.
    pub fn flatten_specialty(&mut self) {
        self.category
            .clone_from(&self.specialty_object.category.strings.label);
        self.specialty.clone_from(&self.specialty_object.strings.label);
    }
}

// ── Collection ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Href {
    #[serde(deserialize_with = "nullable")]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLinks {
    pub image: Href,
}

/// A case embedded in a collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub caption: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub content_type: i64,
    pub comment_count: u64,
    pub followers: u64,
    pub vote_count: u64,
    #[serde(rename = "_links")]
    pub links: ItemLinks,
}

/// An author embedded in a collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionAuthor {
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub verified: bool,
    #[serde(deserialize_with = "nullable")]
    pub specialty_name: String,
    #[serde(deserialize_with = "nullable")]
    pub specialty_category: String,
    pub top_contributor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionEmbedded {
    pub items: Vec<CollectionItem>,
    pub authors: Vec<CollectionAuthor>,
}

/// A curated collection of cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub id: String,
    pub size: u64,
    #[serde(rename = "_embedded")]
    pub embedded: CollectionEmbedded,
}

// ── Sum type ─────────────────────────────────────────────────────────────────

/// A fetched resource, tagged by kind. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Case(Case),
    User(User),
    Collection(Collection),
}

impl Resource {
    /// Decodes an upstream response body as the structure for `kind`.
    ///
    /// User bodies are post-processed with [`User::flatten_specialty`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`](crate::BridgeError::Decode) if the body
    /// is not valid JSON for the requested kind.
    pub fn decode(kind: ResourceKind, body: &[u8]) -> Result<Self> {
        Ok(match kind {
            ResourceKind::Case => Self::Case(serde_json::from_slice(body)?),
            ResourceKind::User => {
                let mut user: User = serde_json::from_slice(body)?;
                user.flatten_specialty();
                Self::User(user)
            }
            ResourceKind::Collection => Self::Collection(serde_json::from_slice(body)?),
        })
    }

    /// The kind this resource was decoded as.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Case(_) => ResourceKind::Case,
            Self::User(_) => ResourceKind::User,
            Self::Collection(_) => ResourceKind::Collection,
        }
    }
}
