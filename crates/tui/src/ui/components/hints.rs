use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Screen},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }
    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub fn for_screen(state: &AppState) -> Vec<KeyHint> {
    match state.screen {
        Screen::Home => vec![
            KeyHint::new("n", "nueva transacción"),
            KeyHint::new("q", "salir"),
        ],
        Screen::NewTransaction => vec![
            KeyHint::new("Tab", "siguiente"),
            KeyHint::new("←→", "tipo"),
            KeyHint::new("Enter", "registrar"),
            KeyHint::new("Esc", "volver"),
        ],
    }
}
