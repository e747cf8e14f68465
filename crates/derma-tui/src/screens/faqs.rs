//! FAQ accordion. At most one answer is open at a time.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use derma_core::Faq;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::{LoadState, section_title};
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

#[derive(Default)]
pub struct FaqsScreen {
    faqs: Vec<Faq>,
    state: LoadState,
    selected: usize,
    open: Option<usize>,
    focused: bool,
}

impl FaqsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the selected entry, or close it if it is already open.
    fn toggle(&mut self) {
        if self.faqs.is_empty() {
            return;
        }
        self.open = if self.open == Some(self.selected) {
            None
        } else {
            Some(self.selected)
        };
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, faq) in self.faqs.iter().enumerate() {
            let is_open = self.open == Some(i);
            let marker = if is_open { "▾ " } else { "▸ " };
            let style = if i == self.selected {
                theme::selected()
            } else {
                theme::body()
            };
            lines.push(Line::from(Span::styled(format!("{marker}{}", faq.q), style)));
            if is_open {
                lines.push(Line::from(Span::styled(
                    format!("  {}", faq.a),
                    theme::muted(),
                )));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Component for FaqsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.faqs.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Loaded(Collection::Faqs(loaded)) = action {
            self.state = LoadState::from_loaded(loaded);
            self.faqs.clone_from(&loaded.data);
            self.selected = 0;
            self.open = None;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(section_title("Frequently Asked Questions", &self.state))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        frame.render_widget(
            Paragraph::new(self.lines())
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
