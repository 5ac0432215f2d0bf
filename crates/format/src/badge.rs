//! Contributor badges shown in an author footer.

use crate::{
    links::{TOP_CONTRIBUTOR_BADGE_ICON, VERIFIED_BADGE_ICON},
    message::Attachment,
};

/// At most one badge is shown; top contributor outranks verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    TopContributor,
    Verified,
}

impl Badge {
    /// Picks the badge for an author with the given flags.
    #[must_use]
    pub fn select(top_contributor: bool, verified: bool) -> Option<Self> {
        if top_contributor {
            Some(Self::TopContributor)
        } else if verified {
            Some(Self::Verified)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TopContributor => "Top Contributor",
            Self::Verified => "Verified",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::TopContributor => TOP_CONTRIBUTOR_BADGE_ICON,
            Self::Verified => VERIFIED_BADGE_ICON,
        }
    }
}

/// Sets the footer and footer icon of `section` to the selected badge, if any.
pub fn apply(section: &mut Attachment, top_contributor: bool, verified: bool) {
    if let Some(badge) = Badge::select(top_contributor, verified) {
        section.footer = Some(badge.label().to_string());
        section.footer_icon = Some(badge.icon().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_priority() {
        assert_eq!(Badge::select(true, true), Some(Badge::TopContributor));
        assert_eq!(Badge::select(true, false), Some(Badge::TopContributor));
        assert_eq!(Badge::select(false, true), Some(Badge::Verified));
        assert_eq!(Badge::select(false, false), None);
    }

    #[test]
    fn test_apply_both_flags_renders_only_top_contributor() {
        let mut section = Attachment::default();
        apply(&mut section, true, true);
        assert_eq!(section.footer.as_deref(), Some("Top Contributor"));
        assert_eq!(section.footer_icon.as_deref(), Some(TOP_CONTRIBUTOR_BADGE_ICON));
    }

    #[test]
    fn test_apply_no_badge_leaves_footer() {
        let mut section = Attachment::default();
        apply(&mut section, false, false);
        assert!(section.footer.is_none());
        assert!(section.footer_icon.is_none());
    }
}
