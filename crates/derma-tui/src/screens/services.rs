//! Services, split into skin and hair. `c` flips the category.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use derma_core::catalog::{ServiceGroups, group_services};
use derma_core::{PageLayout, Service, ServiceCategory};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::LoadState;
use super::gallery::Gallery;
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

pub struct ServicesScreen {
    groups: ServiceGroups,
    category: ServiceCategory,
    gallery: Gallery<Service>,
    focused: bool,
}

impl ServicesScreen {
    pub fn new(cols: u16) -> Self {
        Self {
            groups: ServiceGroups::default(),
            category: ServiceCategory::Skin,
            gallery: Gallery::new("Our Services", PageLayout::TRIPLE, cols),
            focused: false,
        }
    }

    fn toggle_category(&mut self) {
        self.category = match self.category {
            ServiceCategory::Skin => ServiceCategory::Hair,
            ServiceCategory::Hair => ServiceCategory::Skin,
        };
        self.gallery
            .set_items(self.groups.get(self.category).to_vec());
    }

    fn tabs(&self) -> Line<'static> {
        let tab = |label: &'static str, category: ServiceCategory| {
            let count = self.groups.get(category).len();
            let style = if self.category == category {
                theme::selected()
            } else {
                theme::tab_inactive()
            };
            Span::styled(format!(" {label} ({count}) "), style)
        };
        Line::from(vec![
            tab("Skin", ServiceCategory::Skin),
            Span::raw("  "),
            tab("Hair", ServiceCategory::Hair),
            Span::styled("    c ", theme::key_hint_key()),
            Span::styled("switch", theme::key_hint()),
        ])
    }
}

fn card(service: &Service) -> (String, Vec<Line<'static>>) {
    (
        service.title.clone(),
        vec![Line::from(service.description.clone())],
    )
}

impl Component for ServicesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') {
            self.toggle_category();
        } else {
            self.gallery.handle_key(key);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(Collection::Services(loaded)) => {
                self.groups = group_services(loaded.data.iter().cloned());
                self.gallery.set_state(LoadState::from_loaded(loaded));
                self.gallery
                    .set_items(self.groups.get(self.category).to_vec());
            }
            Action::Resize(cols, _) => {
                self.gallery.resize(*cols);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [tabs_area, gallery_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(5)]).areas(area);
        frame.render_widget(Paragraph::new(self.tabs()), tabs_area);
        self.gallery.render(frame, gallery_area, self.focused, card);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use derma_core::{LoadOutcome, Loaded, fallback};
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(screen: &mut ServicesScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn category_switch_replaces_the_list_and_rewinds() {
        let mut screen = ServicesScreen::new(120);
        let loaded = Loaded {
            data: fallback::services(),
            used_fallback: true,
            outcome: LoadOutcome::Empty,
        };
        let groups = group_services(loaded.data.clone());
        screen
            .update(&Action::Loaded(Collection::Services(loaded)))
            .unwrap();
        assert_eq!(screen.gallery.items(), groups.skin.as_slice());

        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Char('c'));
        assert_eq!(screen.category, ServiceCategory::Hair);
        assert_eq!(screen.gallery.items(), groups.hair.as_slice());
        assert_eq!(screen.gallery.carousel().current_index(), 0);

        press(&mut screen, KeyCode::Char('c'));
        assert_eq!(screen.category, ServiceCategory::Skin);
    }
}
