//! Clinic palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ROSE: Color = Color::Rgb(232, 121, 160); // #e879a0
pub const TEAL: Color = Color::Rgb(94, 205, 196); // #5ecdc4
pub const GOLD: Color = Color::Rgb(245, 200, 98); // #f5c862
pub const SAGE: Color = Color::Rgb(134, 214, 140); // #86d68c
pub const ALERT: Color = Color::Rgb(255, 107, 107); // #ff6b6b

// ── Extended Palette ──────────────────────────────────────────────────

pub const SOFT_WHITE: Color = Color::Rgb(226, 226, 234); // #e2e2ea
pub const MUTED: Color = Color::Rgb(140, 144, 168); // #8c90a8
pub const BORDER_GRAY: Color = Color::Rgb(88, 96, 128); // #586080
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 38, 52); // #2a2634

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ROSE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Body copy inside cards.
pub fn body() -> Style {
    Style::default().fg(SOFT_WHITE)
}

/// Secondary text: roles, degrees, URLs.
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Headline text for hero slides and card names.
pub fn headline() -> Style {
    Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
}

/// Filled rating stars.
pub fn stars() -> Style {
    Style::default().fg(GOLD)
}

/// Selected row, open FAQ or active category.
pub fn selected() -> Style {
    Style::default()
        .fg(ROSE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
}

/// Inactive tab.
pub fn tab_inactive() -> Style {
    Style::default().fg(MUTED)
}

/// Status-bar marker for live data.
pub fn live() -> Style {
    Style::default().fg(SAGE)
}

/// Status-bar marker for fallback data.
pub fn fallback() -> Style {
    Style::default().fg(ALERT)
}

/// Key hint description text.
pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

/// Key hint key label.
pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}
