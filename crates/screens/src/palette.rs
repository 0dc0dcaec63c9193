use api_types::transaction::TransactionKind;

/// Presentation color of a transaction row. The front end maps each token
/// to a concrete color in its theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Tint,
    Gray,
    Blue,
    #[default]
    White,
}

impl ColorToken {
    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Tint,
            TransactionKind::Expense => Self::Gray,
            TransactionKind::Transfer => Self::Blue,
        }
    }
}

/// Color for a `type` string as sent by the backend. Case-insensitive;
/// unknown types get the default token.
pub fn color_for(kind: &str) -> ColorToken {
    kind.parse::<TransactionKind>()
        .map(ColorToken::for_kind)
        .unwrap_or_default()
}
