//! Screen implementations. Each screen is a top-level Component.

pub mod before_after;
pub mod doctors;
pub mod faqs;
pub mod gallery;
pub mod hero;
pub mod services;
pub mod testimonials;
pub mod videos;

use derma_core::carousel::MOBILE_BREAKPOINT_PX;
use derma_core::{LoadOutcome, Loaded};
use ratatui::text::{Line, Span};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

/// Pixels per terminal column when feeding carousel breakpoints.
pub const PX_PER_COLUMN: u32 = 8;

/// Viewport width in "pixels" for a terminal `cols` wide.
pub fn viewport_px(cols: u16) -> u32 {
    u32::from(cols) * PX_PER_COLUMN
}

/// Whether the terminal is past the mobile breakpoint.
pub fn is_wide(cols: u16) -> bool {
    viewport_px(cols) >= MOBILE_BREAKPOINT_PX
}

/// Where a section's data currently comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready {
        used_fallback: bool,
        outcome: LoadOutcome,
    },
}

impl LoadState {
    pub fn from_loaded<T>(loaded: &Loaded<T>) -> Self {
        Self::Ready {
            used_fallback: loaded.used_fallback,
            outcome: loaded.outcome.clone(),
        }
    }

    /// Short badge for block titles.
    pub fn badge(&self) -> Span<'static> {
        match self {
            Self::Loading => Span::styled(" loading… ", theme::muted()),
            Self::Ready {
                used_fallback: false,
                ..
            } => Span::styled(" live ", theme::live()),
            Self::Ready { outcome, .. } => {
                Span::styled(format!(" built-in ({outcome}) "), theme::fallback())
            }
        }
    }
}

/// Block title: section name followed by the load badge.
pub fn section_title(name: &str, state: &LoadState) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {name} "), theme::title_style()),
        state.badge(),
    ])
}

/// `★★★★☆` for a 0-5 rating.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Create screen components for the tab bar, sized for `cols`.
pub fn create_screens(cols: u16) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Hero, Box::new(hero::HeroScreen::new(cols))),
        (ScreenId::Doctors, Box::new(doctors::DoctorsScreen::new(cols))),
        (
            ScreenId::Services,
            Box::new(services::ServicesScreen::new(cols)),
        ),
        (
            ScreenId::BeforeAfter,
            Box::new(before_after::BeforeAfterScreen::new(cols)),
        ),
        (
            ScreenId::Testimonials,
            Box::new(testimonials::TestimonialsScreen::new(cols)),
        ),
        (ScreenId::Videos, Box::new(videos::VideosScreen::new(cols))),
        (ScreenId::Faqs, Box::new(faqs::FaqsScreen::new())),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn breakpoint_falls_at_ninety_six_columns() {
        assert!(!is_wide(95));
        assert!(is_wide(96));
        assert_eq!(viewport_px(100), 800);
    }

    #[test]
    fn stars_clamp_to_five() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn every_tab_gets_a_screen() {
        let ids: Vec<ScreenId> = create_screens(120).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ScreenId::ALL.to_vec());
    }
}
