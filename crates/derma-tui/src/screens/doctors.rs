//! Doctors: three cards per page on wide terminals.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use derma_core::{Doctor, PageLayout};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
};

use super::gallery::Gallery;
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

pub struct DoctorsScreen {
    gallery: Gallery<Doctor>,
    focused: bool,
}

impl DoctorsScreen {
    pub fn new(cols: u16) -> Self {
        Self {
            gallery: Gallery::new("Our Doctors", PageLayout::TRIPLE, cols),
            focused: false,
        }
    }
}

fn card(doctor: &Doctor) -> (String, Vec<Line<'static>>) {
    let lines = vec![
        Line::from(Span::styled(doctor.degree.clone(), theme::muted())),
        Line::from(""),
        Line::from(doctor.expertise.clone()),
        Line::from(""),
        Line::from(Span::styled(doctor.experience.clone(), theme::stars())),
    ];
    (doctor.name.clone(), lines)
}

impl Component for DoctorsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        self.gallery.handle_key(key);
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(Collection::Doctors(loaded)) => self.gallery.load(loaded.clone()),
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
