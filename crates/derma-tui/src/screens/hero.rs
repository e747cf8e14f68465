//! Hero banner: static slides on a 5 s rotation.
//!
//! Narrow terminals get the shorter deck. Swapping decks starts the new
//! one from its first slide.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use derma_core::AutoRotator;
use derma_core::fallback::{HeroSlide, hero_slides};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::is_wide;
use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct HeroScreen {
    wide: bool,
    rotator: AutoRotator,
    focused: bool,
}

impl HeroScreen {
    pub fn new(cols: u16) -> Self {
        let wide = is_wide(cols);
        Self {
            wide,
            rotator: AutoRotator::new(hero_slides(wide).len()),
            focused: false,
        }
    }

    fn slides(&self) -> &'static [HeroSlide] {
        hero_slides(self.wide)
    }

    pub fn current(&self) -> Option<&'static HeroSlide> {
        self.slides().get(self.rotator.current())
    }

    fn dots(&self) -> Line<'static> {
        let spans = (0..self.rotator.len())
            .map(|i| {
                if i == self.rotator.current() {
                    Span::styled("● ", theme::headline())
                } else {
                    Span::styled("○ ", theme::muted())
                }
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }
}

impl Component for HeroScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left => self.rotator.prev(),
            KeyCode::Right => self.rotator.next(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.rotator.tick();
            }
            Action::Resize(cols, _) => {
                let wide = is_wide(*cols);
                if wide != self.wide {
                    self.wide = wide;
                    self.rotator.set_len(self.slides().len());
                    self.rotator.select(0);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(slide) = self.current() else {
            return;
        };

        let [_, body, dots] = Layout::vertical([
            Constraint::Percentage(30),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(inner);

        let lines = vec![
            Line::from(Span::styled(slide.title, theme::headline())),
            Line::from(""),
            Line::from(Span::styled(slide.subtitle, theme::title_style())),
            Line::from(""),
            Line::from(Span::styled(slide.description, theme::body())),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
        frame.render_widget(
            Paragraph::new(self.dots()).alignment(Alignment::Center),
            dots,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn rotates_every_five_seconds() {
        let mut hero = HeroScreen::new(120);
        assert_eq!(hero.rotator.current(), 0);

        tokio::time::advance(Duration::from_secs(5)).await;
        hero.update(&Action::Tick).unwrap();
        assert_eq!(hero.rotator.current(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        hero.update(&Action::Tick).unwrap();
        assert_eq!(hero.rotator.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deck_swap_restarts_from_the_first_slide() {
        let mut hero = HeroScreen::new(120);
        assert_eq!(hero.rotator.len(), hero_slides(true).len());
        hero.rotator.select(2);

        hero.update(&Action::Resize(80, 40)).unwrap();
        assert_eq!(hero.rotator.len(), hero_slides(false).len());
        assert_eq!(hero.rotator.current(), 0);
        assert_eq!(hero.current(), hero_slides(false).first());

        hero.rotator.select(1);
        hero.update(&Action::Resize(90, 40)).unwrap();
        assert_eq!(hero.rotator.current(), 1);

        hero.update(&Action::Resize(140, 40)).unwrap();
        assert_eq!(hero.rotator.len(), hero_slides(true).len());
        assert_eq!(hero.rotator.current(), 0);
    }
}
