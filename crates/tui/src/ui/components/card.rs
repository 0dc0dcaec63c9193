use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use screens::{Currency, format_currency};

use crate::ui::{components::money::styled_total, theme::Theme};

/// Rounded, titled frame shared by every dashboard section. `focused` marks
/// the section that reacts to data loading.
pub fn panel<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.panel))
}

/// Headline earning with what has been spent out of it.
pub fn render_earning(
    frame: &mut Frame<'_>,
    area: Rect,
    earning: f64,
    spent: f64,
    currency: Currency,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(Span::styled(
            format_currency(earning, currency),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Gastado: ", Style::default().fg(theme.dim)),
            Span::raw(format_currency(spent, currency)),
            Span::styled("  Disponible: ", Style::default().fg(theme.dim)),
            Span::raw(format_currency(earning - spent, currency)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(panel("Mis ingresos", false, theme)),
        area,
    );
}

/// One summary block: the block total on top, then one line per item.
pub struct SummaryCard<'a> {
    title: &'a str,
    total: f64,
    rows: Vec<Line<'a>>,
}

impl<'a> SummaryCard<'a> {
    pub fn new(title: &'a str, total: f64) -> Self {
        Self {
            title,
            total,
            rows: Vec::new(),
        }
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Line<'a>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect, currency: Currency, theme: &Theme) {
        let mut lines = vec![Line::from(styled_total(self.total, currency, theme))];
        lines.extend(self.rows);
        frame.render_widget(
            Paragraph::new(lines).block(panel(self.title, false, theme)),
            area,
        );
    }
}
