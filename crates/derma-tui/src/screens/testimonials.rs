//! Testimonials: a rotating spotlight above a carousel of review cards.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use derma_core::{AutoRotator, PageLayout, Testimonial};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::gallery::Gallery;
use super::stars;
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

/// Cards shown under the spotlight.
const GRID_LIMIT: usize = 6;

pub struct TestimonialsScreen {
    spotlight: AutoRotator,
    gallery: Gallery<Testimonial>,
    all: Vec<Testimonial>,
    focused: bool,
}

impl TestimonialsScreen {
    pub fn new(cols: u16) -> Self {
        Self {
            spotlight: AutoRotator::new(0),
            gallery: Gallery::new("What Patients Say", PageLayout::TRIPLE, cols),
            all: Vec::new(),
            focused: false,
        }
    }

    pub fn spotlighted(&self) -> Option<&Testimonial> {
        self.all.get(self.spotlight.current())
    }

    fn render_spotlight(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Spotlight ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(t) = self.spotlighted() else {
            return;
        };
        let lines = vec![
            Line::from(Span::styled(format!("“{}”", t.review), theme::body())),
            Line::from(""),
            Line::from(vec![
                Span::styled(t.name.clone(), theme::headline()),
                Span::styled(format!(" · {}  ", t.role), theme::muted()),
                Span::styled(stars(t.rating), theme::stars()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}

fn card(t: &Testimonial) -> (String, Vec<Line<'static>>) {
    let lines = vec![
        Line::from(Span::styled(t.role.clone(), theme::muted())),
        Line::from(Span::styled(stars(t.rating), theme::stars())),
        Line::from(""),
        Line::from(t.review.clone()),
    ];
    (t.name.clone(), lines)
}

impl Component for TestimonialsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        self.gallery.handle_key(key);
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(Collection::Testimonials(loaded)) => {
                self.all.clone_from(&loaded.data);
                self.spotlight.set_len(self.all.len());
                let mut grid = loaded.clone();
                grid.data.truncate(GRID_LIMIT);
                self.gallery.load(grid);
            }
            Action::Resize(cols, _) => {
                self.gallery.resize(*cols);
            }
            Action::Tick => {
                self.spotlight.tick();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [spot, cards] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(6)]).areas(area);
        self.render_spotlight(frame, spot);
        self.gallery.render(frame, cards, self.focused, card);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use derma_core::{LoadOutcome, Loaded};
    use pretty_assertions::assert_eq;

    use super::*;

    fn review(n: usize) -> Testimonial {
        Testimonial {
            id: n.to_string(),
            name: format!("Patient {n}"),
            role: "Patient".into(),
            rating: 5,
            review: "Great care.".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn spotlight_rotates_over_all_and_grid_keeps_six() {
        let mut screen = TestimonialsScreen::new(120);
        let loaded = Loaded {
            data: (1..=8).map(review).collect(),
            used_fallback: false,
            outcome: LoadOutcome::Live,
        };
        screen
            .update(&Action::Loaded(Collection::Testimonials(loaded)))
            .unwrap();
        assert_eq!(screen.gallery.items().len(), 6);
        assert_eq!(screen.spotlighted().unwrap().id, "1");

        tokio::time::advance(Duration::from_secs(5 * 7)).await;
        screen.update(&Action::Tick).unwrap();
        assert_eq!(screen.spotlighted().unwrap().id, "8");

        tokio::time::advance(Duration::from_secs(5)).await;
        screen.update(&Action::Tick).unwrap();
        assert_eq!(screen.spotlighted().unwrap().id, "1");
    }
}
