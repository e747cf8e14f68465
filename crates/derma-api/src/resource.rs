// The six content collections served by the backend.

use strum::{Display, EnumIter, EnumString};

/// One of the backend's content collections.
///
/// `Display` / `FromStr` use the kebab-case CLI spelling; the URL path
/// segment is [`path_segment`](Self::path_segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Resource {
    Doctors,
    Videos,
    Testimonials,
    Faqs,
    Services,
    #[strum(to_string = "before-after", serialize = "beforeafter", serialize = "beforeAfter")]
    BeforeAfter,
}

impl Resource {
    /// All resources in admin tab order.
    pub const ALL: [Resource; 6] = [
        Self::Doctors,
        Self::Videos,
        Self::Testimonials,
        Self::Faqs,
        Self::Services,
        Self::BeforeAfter,
    ];

    /// Path segment under `/api/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Doctors => "doctors",
            Self::Videos => "videos",
            Self::Testimonials => "testimonials",
            Self::Faqs => "faqs",
            Self::Services => "services",
            Self::BeforeAfter => "beforeAfter",
        }
    }

    /// Whether records of this resource carry an uploadable image (`img`).
    ///
    /// Writes carrying an image are sent as `multipart/form-data`.
    pub fn accepts_image(self) -> bool {
        matches!(self, Self::Doctors | Self::Services | Self::BeforeAfter)
    }

    /// Singular, human-readable noun ("doctor", "FAQ", ...).
    pub fn singular(self) -> &'static str {
        match self {
            Self::Doctors => "doctor",
            Self::Videos => "video",
            Self::Testimonials => "testimonial",
            Self::Faqs => "FAQ",
            Self::Services => "service",
            Self::BeforeAfter => "before/after case",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn before_after_accepts_all_spellings() {
        for raw in ["before-after", "beforeafter", "beforeAfter", "BEFORE-AFTER"] {
            assert_eq!(Resource::from_str(raw).ok(), Some(Resource::BeforeAfter), "{raw}");
        }
        assert_eq!(Resource::BeforeAfter.to_string(), "before-after");
        assert_eq!(Resource::BeforeAfter.path_segment(), "beforeAfter");
    }

    #[test]
    fn only_three_resources_take_images() {
        let with_images: Vec<_> = Resource::iter().filter(|r| r.accepts_image()).collect();
        assert_eq!(
            with_images,
            vec![Resource::Doctors, Resource::Services, Resource::BeforeAfter]
        );
    }

    #[test]
    fn all_matches_iteration_order() {
        assert_eq!(Resource::ALL.to_vec(), Resource::iter().collect::<Vec<_>>());
    }
}
