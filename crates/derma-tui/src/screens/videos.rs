//! Videos: long-form YouTube on top, shorts in pairs below.
//! `↑`/`↓` pick which row the arrows page.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use derma_core::catalog::split_videos;
use derma_core::media::{embed_url, thumbnail_for};
use derma_core::{PageLayout, Video};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::LoadState;
use super::gallery::Gallery;
use crate::action::{Action, Collection};
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Youtube,
    Shorts,
}

pub struct VideosScreen {
    youtube: Gallery<Video>,
    shorts: Gallery<Video>,
    row: Row,
    focused: bool,
}

impl VideosScreen {
    pub fn new(cols: u16) -> Self {
        Self {
            youtube: Gallery::new("Videos", PageLayout::TRIPLE, cols),
            shorts: Gallery::new("Shorts", PageLayout::PAIRED, cols),
            row: Row::Youtube,
            focused: false,
        }
    }

    fn active(&mut self) -> &mut Gallery<Video> {
        match self.row {
            Row::Youtube => &mut self.youtube,
            Row::Shorts => &mut self.shorts,
        }
    }

    fn is_hidden(&self) -> bool {
        matches!(self.youtube.state(), LoadState::Ready { .. })
            && self.youtube.items().is_empty()
            && self.shorts.items().is_empty()
    }
}

fn card(video: &Video) -> (String, Vec<Line<'static>>) {
    let mut lines = Vec::new();
    if let Some(url) = embed_url(&video.url) {
        lines.push(Line::from(Span::styled(url, theme::body())));
    }
    if let Some(thumb) = thumbnail_for(video) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(thumb, theme::muted())));
    }
    (video.title.clone(), lines)
}

impl Component for VideosScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Up => self.row = Row::Youtube,
            KeyCode::Down => self.row = Row::Shorts,
            _ => {
                self.active().handle_key(key);
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(Collection::Videos(loaded)) => {
                let (youtube, shorts) = split_videos(loaded.data.iter().cloned());
                let state = LoadState::from_loaded(loaded);
                self.youtube.set_state(state.clone());
                self.youtube.set_items(youtube);
                self.shorts.set_state(state);
                self.shorts.set_items(shorts);
            }
            Action::Resize(cols, _) => {
                self.youtube.resize(*cols);
                self.shorts.resize(*cols);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.is_hidden() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            frame.render_widget(
                Paragraph::new(Span::styled("No videos published yet.", theme::muted()))
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        }

        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        self.youtube
            .render(frame, top, self.focused && self.row == Row::Youtube, card);
        self.shorts
            .render(frame, bottom, self.focused && self.row == Row::Shorts, card);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use derma_core::{LoadOutcome, Loaded, VideoType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn video(id: &str, video_type: VideoType) -> Video {
        Video {
            id: id.into(),
            title: format!("Video {id}"),
            video_type,
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
            thumbnail: None,
            created_at: None,
        }
    }

    fn press(screen: &mut VideosScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn rows_page_independently() {
        let mut screen = VideosScreen::new(120);
        let loaded = Loaded {
            data: vec![
                video("1", VideoType::Youtube),
                video("2", VideoType::Short),
                video("3", VideoType::Short),
                video("4", VideoType::Short),
            ],
            used_fallback: false,
            outcome: LoadOutcome::Live,
        };
        screen
            .update(&Action::Loaded(Collection::Videos(loaded)))
            .unwrap();
        assert_eq!(screen.youtube.items().len(), 1);
        assert_eq!(screen.shorts.visible().len(), 2);

        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.youtube.carousel().current_index(), 0);

        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.shorts.carousel().current_index(), 1);
        assert_eq!(screen.shorts.visible()[0].id, "3");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_collection_hides_the_section() {
        let mut screen = VideosScreen::new(120);
        assert!(!screen.is_hidden());
        let loaded = Loaded {
            data: Vec::new(),
            used_fallback: true,
            outcome: LoadOutcome::Empty,
        };
        screen
            .update(&Action::Loaded(Collection::Videos(loaded)))
            .unwrap();
        assert!(screen.is_hidden());
    }
}
