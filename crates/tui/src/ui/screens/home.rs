use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use screens::{FeedState, format_currency};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{SummaryCard, panel, render_earning},
            money::{direction_arrow, inline_share_bar, transaction_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Greeting
            Constraint::Length(4), // Earning
            Constraint::Length(8), // Summary blocks
            Constraint::Min(5),    // Recent transactions
        ])
        .split(area);

    render_greeting(frame, layout[0], state, &theme);
    render_earning(
        frame,
        layout[1],
        state.dashboard.earning,
        state.dashboard.spending_total(),
        state.currency,
        &theme,
    );
    render_summary(frame, layout[2], state, &theme);
    render_recent_transactions(frame, layout[3], state, &theme);
}

fn render_greeting(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let name = state.dashboard.user_name.as_str();
    let lines = vec![
        Line::from(Span::styled(
            format!("Hola, {name}!"),
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            format!("Buenas noches {name}!"),
            Style::default().fg(theme.tint).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let dashboard = &state.dashboard;
    let currency = state.currency;
    let label = |name: &str| Span::styled(format!("{name:<12}"), Style::default().fg(theme.dim));

    SummaryCard::new("Gastos", dashboard.expense_total())
        .rows(dashboard.expenses.iter().map(|item| {
            Line::from(vec![
                label(&item.name),
                Span::raw(inline_share_bar(item.percentage, 8)),
            ])
        }))
        .render(frame, cols[0], currency, theme);

    SummaryCard::new("Ingresos", dashboard.income_total())
        .rows(dashboard.income.iter().map(|item| {
            Line::from(vec![
                label(&item.name),
                Span::raw(format_currency(item.amount, currency)),
            ])
        }))
        .render(frame, cols[1], currency, theme);

    SummaryCard::new("Gastos recientes", dashboard.spending_total())
        .rows(dashboard.spending.iter().map(|item| {
            Line::from(vec![
                Span::styled(
                    item.date.format("%d/%m ").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!("{:<10}", item.name)),
                Span::raw(format_currency(item.amount, currency)),
            ])
        }))
        .render(frame, cols[2], currency, theme);
}

fn render_recent_transactions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel("Transacciones Recientes", true, theme);

    match state.feed.state() {
        FeedState::NotLoaded | FeedState::Loading => {
            let text = Span::styled("Cargando transacciones...", Style::default().fg(theme.dim));
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
        FeedState::Empty => {
            let text = Span::styled(
                "No hay transacciones recientes",
                Style::default().fg(theme.dim),
            );
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
        FeedState::Loaded(_) => {
            let items: Vec<ListItem<'_>> = state
                .feed
                .preview()
                .iter()
                .map(|tx| {
                    ListItem::new(vec![
                        Line::from(vec![
                            direction_arrow(tx, theme),
                            Span::raw(" "),
                            Span::styled(
                                tx.description.clone(),
                                Style::default().fg(theme.text),
                            ),
                            Span::raw("  "),
                            transaction_amount(tx, state.currency, theme),
                        ]),
                        Line::from(Span::styled(
                            format!("  {}", tx.kind),
                            Style::default().fg(theme.dim),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use screens::{Currency, Dashboard, TransactionFeed};

    use super::*;
    use crate::app::Screen;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> AppState {
        AppState {
            screen: Screen::Home,
            dashboard: Dashboard::sample(),
            currency: Currency::Hnl,
            feed: TransactionFeed::new(),
            new_transaction: None,
            toast: None,
            base_url: String::new(),
            last_refresh: None,
        }
    }

    #[test]
    fn earning_card_pairs_earning_with_spending() {
        let screen = draw(&state());
        assert!(screen.contains("Mis ingresos"));
        assert!(screen.contains("L 7,000.77"));
        assert!(screen.contains("Gastado: L 1,670.40"));
        assert!(screen.contains("Disponible: L 5,330.37"));
    }

    #[test]
    fn summary_cards_lead_with_their_totals() {
        let screen = draw(&state());
        assert!(screen.contains("Gastos"));
        assert!(screen.contains("L 2,810.75"));
        assert!(screen.contains("L 7,000.77"));
        assert!(screen.contains("Cargando transacciones..."));
    }
}
