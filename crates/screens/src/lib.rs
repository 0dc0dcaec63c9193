//! Screen logic of the Cartera personal-finance app, independent of any
//! rendering toolkit.
//!
//! - [`form`]: the new-transaction form (draft, validation, submission).
//! - [`feed`]: the recent-transactions preview of the dashboard.
//! - [`dashboard`]: injected summary figures.
//! - [`palette`] and [`money`]: presentation helpers.
//! - [`HttpClient`]: the [`Backend`] talking to the transactions service.

pub use backend::Backend;
pub use client::HttpClient;
pub use dashboard::Dashboard;
pub use error::{ClientError, DashboardError};
pub use feed::{FeedState, TransactionFeed};
pub use form::{
    Field, FieldError, SubmissionState, SubmitStart, TransactionDraft, TransactionForm,
    ValidationResult,
};
pub use money::{Currency, Money, format_currency};
pub use palette::{ColorToken, color_for};

pub mod dashboard;
pub mod feed;
pub mod form;
pub mod money;
pub mod palette;

mod backend;
mod client;
mod error;
