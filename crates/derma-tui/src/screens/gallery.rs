//! Card carousel shared by the gallery-style screens.
//!
//! Owns the items, their [`PagedCarousel`] and load state, and renders the
//! visible window as a row of equal-width cards with a page indicator.

use crossterm::event::{KeyCode, KeyEvent};
use derma_core::{Loaded, PageLayout, PagedCarousel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::{LoadState, section_title, viewport_px};
use crate::theme;

pub struct Gallery<T> {
    name: &'static str,
    items: Vec<T>,
    carousel: PagedCarousel,
    state: LoadState,
}

impl<T> Gallery<T> {
    pub fn new(name: &'static str, layout: PageLayout, cols: u16) -> Self {
        Self {
            name,
            items: Vec::new(),
            carousel: PagedCarousel::new(layout, 0, viewport_px(cols)),
            state: LoadState::Loading,
        }
    }

    /// Swap in a freshly loaded collection.
    pub fn load(&mut self, loaded: Loaded<T>) {
        self.state = LoadState::from_loaded(&loaded);
        self.set_items(loaded.data);
    }

    /// Replace the list (category switch, reload). Rewinds to the start.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.carousel.replace_items(items.len());
        self.items = items;
    }

    pub fn set_state(&mut self, state: LoadState) {
        self.state = state;
    }

    /// Returns whether the page size changed.
    pub fn resize(&mut self, cols: u16) -> bool {
        self.carousel.on_viewport_change(viewport_px(cols))
    }

    /// `←`/`→` page the carousel. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.carousel.prev();
                true
            }
            KeyCode::Right => {
                self.carousel.next();
                true
            }
            _ => false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> &[T] {
        self.carousel.visible_slice(&self.items)
    }

    #[cfg(test)]
    pub fn carousel(&self) -> &PagedCarousel {
        &self.carousel
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Render the current window, one card per visible item.
    pub fn render<F>(&self, frame: &mut Frame, area: Rect, focused: bool, card: F)
    where
        F: Fn(&T) -> (String, Vec<Line<'static>>),
    {
        let block = Block::default()
            .title(section_title(self.name, &self.state))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = self.visible();
        if visible.is_empty() {
            let text = match self.state {
                LoadState::Loading => "Loading…",
                LoadState::Ready { .. } => "Nothing to show yet.",
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, theme::muted())).alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let [cards_area, indicator_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);

        let per_page = u32::try_from(self.carousel.items_per_page().max(1)).unwrap_or(1);
        let columns = Layout::horizontal(
            (0..per_page).map(|_| Constraint::Ratio(1, per_page)),
        )
        .split(cards_area);

        for (item, slot) in visible.iter().zip(columns.iter()) {
            let (title, lines) = card(item);
            let card_block = Block::default()
                .title(Span::styled(format!(" {title} "), theme::headline()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            frame.render_widget(
                Paragraph::new(lines)
                    .style(theme::body())
                    .wrap(Wrap { trim: true })
                    .block(card_block),
                *slot,
            );
        }

        frame.render_widget(
            Paragraph::new(self.indicator()).alignment(Alignment::Center),
            indicator_area,
        );
    }

    /// `‹ 2 / 4 ›` when there is more than one page, else blank.
    pub fn indicator(&self) -> Line<'static> {
        if !self.carousel.needs_controls() {
            return Line::default();
        }
        Line::from(vec![
            Span::styled("‹ ", theme::key_hint_key()),
            Span::styled(
                format!(
                    "{} / {}",
                    self.carousel.current_index() + 1,
                    self.carousel.page_count()
                ),
                theme::key_hint(),
            ),
            Span::styled(" ›", theme::key_hint_key()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use derma_core::LoadOutcome;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded(items: Vec<u32>) -> Loaded<u32> {
        Loaded {
            data: items,
            used_fallback: false,
            outcome: LoadOutcome::Live,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn arrows_page_through_and_wrap() {
        let mut gallery = Gallery::new("Numbers", PageLayout::TRIPLE, 120);
        gallery.load(loaded(vec![1, 2, 3, 4, 5]));
        assert_eq!(gallery.visible(), &[1, 2, 3]);

        assert!(gallery.handle_key(key(KeyCode::Right)));
        assert_eq!(gallery.visible(), &[2, 3, 4]);

        tokio::time::advance(std::time::Duration::from_millis(600)).await;
        gallery.handle_key(key(KeyCode::Left));
        tokio::time::advance(std::time::Duration::from_millis(600)).await;
        gallery.handle_key(key(KeyCode::Left));
        assert_eq!(gallery.visible(), &[3, 4, 5]);
        assert!(!gallery.handle_key(key(KeyCode::Up)));
    }

    #[tokio::test(start_paused = true)]
    async fn narrowing_below_breakpoint_shows_one_card_from_the_start() {
        let mut gallery = Gallery::new("Numbers", PageLayout::TRIPLE, 120);
        gallery.load(loaded(vec![1, 2, 3, 4]));
        gallery.handle_key(key(KeyCode::Right));

        assert!(gallery.resize(80));
        assert_eq!(gallery.visible(), &[1]);
        assert!(!gallery.resize(60));
    }

    #[tokio::test(start_paused = true)]
    async fn new_data_rewinds_and_sets_state() {
        let mut gallery = Gallery::new("Numbers", PageLayout::PAIRED, 120);
        assert_eq!(gallery.state(), &LoadState::Loading);
        gallery.load(loaded(vec![1, 2, 3]));
        gallery.handle_key(key(KeyCode::Right));
        assert_eq!(gallery.carousel().current_index(), 1);

        gallery.load(Loaded {
            data: vec![7, 8, 9],
            used_fallback: true,
            outcome: LoadOutcome::Failed("timeout".into()),
        });
        assert_eq!(gallery.carousel().current_index(), 0);
        assert!(matches!(
            gallery.state(),
            LoadState::Ready {
                used_fallback: true,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn indicator_hidden_when_everything_fits() {
        let mut gallery = Gallery::new("Numbers", PageLayout::TRIPLE, 120);
        gallery.load(loaded(vec![1, 2]));
        assert_eq!(gallery.indicator(), Line::default());
        gallery.set_items(vec![1, 2, 3, 4]);
        assert_eq!(gallery.indicator().to_string(), "‹ 1 / 2 ›");
    }
}
