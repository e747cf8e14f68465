//! Screen identifiers, navigable by number keys.

use std::fmt;

/// One section of the site, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Hero,
    Doctors,
    Services,
    BeforeAfter,
    Testimonials,
    Videos,
    Faqs,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 7] = [
        Self::Hero,
        Self::Doctors,
        Self::Services,
        Self::BeforeAfter,
        Self::Testimonials,
        Self::Videos,
        Self::Faqs,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Numeric key (1-7) for this screen.
    pub fn number(self) -> usize {
        self.position() + 1
    }

    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Doctors => "Doctors",
            Self::Services => "Services",
            Self::BeforeAfter => "Results",
            Self::Testimonials => "Reviews",
            Self::Videos => "Videos",
            Self::Faqs => "FAQ",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_round_trip_through_keys() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(8), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Faqs.next(), ScreenId::Hero);
        assert_eq!(ScreenId::Hero.prev(), ScreenId::Faqs);
        assert_eq!(ScreenId::Doctors.next(), ScreenId::Services);
    }
}
