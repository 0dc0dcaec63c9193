use api_types::transaction::{Transaction, TransactionKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use screens::{Currency, color_for, format_currency};

use crate::ui::theme::Theme;

/// Amount of a transaction, colored by its kind.
#[must_use]
pub fn transaction_amount(
    transaction: &Transaction,
    currency: Currency,
    theme: &Theme,
) -> Span<'static> {
    let color = theme.color(color_for(&transaction.kind));
    Span::styled(
        format_currency(transaction.amount, currency),
        Style::default().fg(color),
    )
}

/// `↓` for money coming in, `↑` for everything else.
#[must_use]
pub fn direction_arrow(transaction: &Transaction, theme: &Theme) -> Span<'static> {
    let arrow = if transaction.kind() == Some(TransactionKind::Income) {
        "↓"
    } else {
        "↑"
    };
    Span::styled(
        arrow,
        Style::default().fg(theme.color(color_for(&transaction.kind))),
    )
}

#[must_use]
pub fn styled_total(amount: f64, currency: Currency, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_currency(amount, currency),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

/// Text gauge like `████░░░░░░ 40%` for a share already given in percent.
#[must_use]
pub fn inline_share_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!(
        "{}{} {:.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percentage
    )
}
