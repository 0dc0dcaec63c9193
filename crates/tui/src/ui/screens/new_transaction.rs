use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use api_types::transaction::TransactionKind;
use screens::{Field, form::DESCRIPTION_MAX_CHARS};

use crate::{
    app::{AppState, FormFocus, FormScreen},
    ui::theme::Theme,
};

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(screen) = state.new_transaction.as_ref() else {
        return;
    };
    let theme = Theme::default();

    let card_area = centered_box(56.min(area.width), 17.min(area.height), area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Nueva Transacción ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount label
            Constraint::Length(1), // Amount input
            Constraint::Length(1), // Amount error
            Constraint::Length(1), // Kind label
            Constraint::Length(1), // Kind options
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Description label
            Constraint::Length(1), // Description input
            Constraint::Length(1), // Counter / error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button
        ])
        .margin(1)
        .split(inner);

    let amount_label = format!("Cantidad ({})", state.currency.code());
    render_label(frame, rows[0], &amount_label, &theme);
    render_input(frame, rows[1], screen, Field::Amount, FormFocus::Amount, &theme);
    render_error(frame, rows[2], screen, Field::Amount, &theme);

    render_label(frame, rows[3], Field::Kind.label(), &theme);
    render_kind_options(frame, rows[4], screen, &theme);

    render_label(frame, rows[6], Field::Description.label(), &theme);
    render_input(
        frame,
        rows[7],
        screen,
        Field::Description,
        FormFocus::Description,
        &theme,
    );
    if screen.form.errors().get(Field::Description).is_some() {
        render_error(frame, rows[8], screen, Field::Description, &theme);
    } else {
        let counter = format!(
            "{}/{DESCRIPTION_MAX_CHARS} caracteres",
            screen.form.draft().description_len()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(counter, Style::default().fg(theme.dim)))
                .alignment(Alignment::Right),
            rows[8],
        );
    }

    render_button(frame, rows[10], screen, &theme);
}

fn render_label(frame: &mut Frame<'_>, area: Rect, label: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_string(), Style::default().fg(theme.dim))),
        area,
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &FormScreen,
    field: Field,
    focus: FormFocus,
    theme: &Theme,
) {
    let focused = screen.focus == focus;
    let cursor = if focused { "│" } else { "" };
    let value = screen.form.draft().text(field);

    let style = if screen.form.errors().get(field).is_some() {
        Style::default().fg(theme.error)
    } else if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    frame.render_widget(
        Paragraph::new(Span::styled(format!("> {value}{cursor}"), style)),
        area,
    );
}

fn render_error(frame: &mut Frame<'_>, area: Rect, screen: &FormScreen, field: Field, theme: &Theme) {
    if let Some(err) = screen.form.errors().get(field) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                err.message(field),
                Style::default().fg(theme.error),
            )),
            area,
        );
    }
}

fn render_kind_options(frame: &mut Frame<'_>, area: Rect, screen: &FormScreen, theme: &Theme) {
    let selected = screen.form.draft().kind;
    let focused = screen.focus == FormFocus::Kind;

    let mut spans = Vec::new();
    for kind in TransactionKind::ALL {
        let (marker, style) = if kind == selected {
            let color = if focused { theme.accent } else { theme.text };
            ("(•)", Style::default().fg(color).add_modifier(Modifier::BOLD))
        } else {
            ("( )", Style::default().fg(theme.dim))
        };
        spans.push(Span::styled(format!("{marker} {}  ", kind.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_button(frame: &mut Frame<'_>, area: Rect, screen: &FormScreen, theme: &Theme) {
    let label = if screen.form.is_submitting() {
        "Enviando..."
    } else {
        "Registrar Transacción"
    };
    let style = if screen.form.is_submitting() {
        Style::default().fg(theme.dim)
    } else if screen.focus == FormFocus::Submit {
        Style::default()
            .fg(theme.background)
            .bg(theme.tint)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.tint)
    };

    frame.render_widget(
        Paragraph::new(Span::styled(format!("[ {label} ]"), style)).alignment(Alignment::Center),
        area,
    );
}
