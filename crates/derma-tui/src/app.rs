//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derma_core::CollectionLoader;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::loader_bridge::LoaderBridge;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    /// Shown in the status bar: backend host or "offline".
    backend_label: String,
    bridge: LoaderBridge,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// `loader` is `None` for offline mode. `cols` sizes the carousels
    /// before the first resize event arrives.
    pub fn new(loader: Option<CollectionLoader>, backend_label: String, cols: u16) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let bridge = LoaderBridge::new(loader, action_tx.clone());

        let mut screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(cols).into_iter().collect();
        if let Some(screen) = screens.get_mut(&ScreenId::default()) {
            screen.set_focused(true);
        }

        Self {
            active_screen: ScreenId::default(),
            screens,
            running: true,
            backend_label,
            bridge,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (cols, rows) = tui.size().unwrap_or((80, 24));
        self.action_tx.send(Action::Resize(cols, rows))?;
        self.bridge.spawn_all();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(backend = %self.backend_label, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge.shutdown();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first; everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Reload)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='7')) => {
                let n = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
                self.bridge.shutdown();
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::Reload => {
                info!("reloading collections");
                self.bridge.spawn_all();
            }

            Action::Render => {}

            // Loads, resizes and ticks reach every screen, visible or not.
            Action::Loaded(_) | Action::Resize(..) | Action::Tick => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let [tab_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_tab_bar(frame, tab_area);
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_status_bar(frame, status_area);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(self.active_screen.number() - 1);

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let backend = if self.bridge.is_offline() {
            Span::styled("○ offline", theme::fallback())
        } else {
            Span::styled(format!("● {}", self.backend_label), theme::live())
        };

        let mut spans = vec![Span::raw(" "), backend, Span::styled(" │", theme::key_hint())];
        for (key, label) in [
            ("←/→", "page"),
            ("↑/↓", "row"),
            ("⏎", "open"),
            ("c", "category"),
            ("r", "reload"),
            ("q", "quit"),
        ] {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(label, theme::key_hint()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn global_keys_map_to_actions() {
        let mut app = App::new(None, "offline".into(), 120);
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SwitchScreen(ScreenId::Services))
        ));
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            Some(Action::Reload)
        ));
        assert!(
            app.handle_key_event(key(KeyCode::Char('9')))
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn tab_cycles_screens() {
        let mut app = App::new(None, "offline".into(), 120);
        let action = app.handle_key_event(key(KeyCode::Tab)).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.active_screen, ScreenId::Doctors);

        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let action = app.handle_key_event(back).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.active_screen, ScreenId::Hero);
    }

    #[tokio::test]
    async fn offline_reload_feeds_every_screen() {
        let mut app = App::new(None, "offline".into(), 120);
        app.process_action(&Action::Reload).unwrap();

        let mut loads = 0;
        while let Ok(action) = app.action_rx.try_recv() {
            assert!(matches!(action, Action::Loaded(_)));
            app.process_action(&action).unwrap();
            loads += 1;
        }
        assert_eq!(loads, 6);

        app.process_action(&Action::Quit).unwrap();
        assert!(!app.running);
    }
}
