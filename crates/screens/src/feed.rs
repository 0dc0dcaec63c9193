//! Recent-transactions preview shown on the dashboard.

use api_types::transaction::Transaction;

use crate::{Backend, ClientError};

/// Number of transactions the dashboard shows.
pub const PREVIEW_LEN: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<Transaction>),
    /// Nothing to show: the backend returned no rows, or the load failed.
    Empty,
}

#[derive(Debug, Default)]
pub struct TransactionFeed {
    state: FeedState,
}

impl TransactionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FeedState::Loading
    }

    /// Full list as returned by the backend, in server order.
    pub fn transactions(&self) -> &[Transaction] {
        match &self.state {
            FeedState::Loaded(items) => items,
            _ => &[],
        }
    }

    /// First [`PREVIEW_LEN`] transactions.
    pub fn preview(&self) -> &[Transaction] {
        let items = self.transactions();
        &items[..items.len().min(PREVIEW_LEN)]
    }

    pub fn begin_load(&mut self) {
        self.state = FeedState::Loading;
    }

    /// Stores the response. Errors are logged and degrade to
    /// [`FeedState::Empty`]; they never reach the user.
    pub fn finish_load(&mut self, result: Result<Vec<Transaction>, ClientError>) -> &FeedState {
        self.state = match result {
            Ok(items) if items.is_empty() => FeedState::Empty,
            Ok(items) => {
                tracing::debug!("loaded {} transactions", items.len());
                FeedState::Loaded(items)
            }
            Err(err) => {
                tracing::warn!("failed to load transactions: {err}");
                FeedState::Empty
            }
        };
        &self.state
    }

    pub async fn load<B: Backend>(&mut self, backend: &B) -> &[Transaction] {
        self.begin_load();
        let result = backend.list_transactions().await;
        self.finish_load(result);
        self.transactions()
    }
}
