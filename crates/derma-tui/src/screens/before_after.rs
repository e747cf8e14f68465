//! Before/after results gallery.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use derma_core::{BeforeAfterCase, PageLayout};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
};

use super::gallery::Gallery;
use super::stars;
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

pub struct BeforeAfterScreen {
    gallery: Gallery<BeforeAfterCase>,
    focused: bool,
}

impl BeforeAfterScreen {
    pub fn new(cols: u16) -> Self {
        Self {
            gallery: Gallery::new("Before & After", PageLayout::TRIPLE, cols),
            focused: false,
        }
    }
}

fn card(case: &BeforeAfterCase) -> (String, Vec<Line<'static>>) {
    let mut lines = Vec::new();
    if let Some(category) = case.category.as_deref().filter(|c| !c.is_empty()) {
        lines.push(Line::from(Span::styled(category.to_owned(), theme::muted())));
    }
    if let Some(rating) = case.rating {
        lines.push(Line::from(Span::styled(stars(rating), theme::stars())));
    }
    if let Some(description) = case.description.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(description.to_owned()));
    }
    if !case.img.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(case.img.clone(), theme::muted())));
    }
    (case.title.clone(), lines)
}

impl Component for BeforeAfterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        self.gallery.handle_key(key);
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(Collection::BeforeAfter(loaded)) => self.gallery.load(loaded.clone()),
            Action::Resize(cols, _) => {
                self.gallery.resize(*cols);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        self.gallery.render(frame, area, self.focused, card);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
