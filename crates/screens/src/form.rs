//! New-transaction form: draft, validation and submission lifecycle.
//!
//! The controller is plain state. An event loop drives it with
//! [`TransactionForm::begin_submit`] and [`TransactionForm::finish`] so the
//! request itself can run elsewhere; [`TransactionForm::submit`] chains the
//! two for callers that can simply await.

use std::collections::BTreeMap;

use api_types::transaction::{TransactionKind, TransactionNew};
use thiserror::Error;

use crate::{Backend, ClientError};

pub const DESCRIPTION_MAX_CHARS: usize = 100;

pub const SUCCESS_MESSAGE: &str = "Transacción registrada correctamente";
const SERVER_FALLBACK_MESSAGE: &str = "Error al registrar transacción";
const TRANSPORT_MESSAGE: &str = "No se pudo conectar con el servidor";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Amount,
    Kind,
    Description,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Cantidad",
            Self::Kind => "Tipo de transacción",
            Self::Description => "Descripción",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("must be a valid number")]
    NotANumber,
    #[error("must be greater than 0")]
    NotPositive,
    #[error("maximum 100 characters")]
    TooLong,
}

impl FieldError {
    /// Text shown under the offending input.
    pub fn message(self, field: Field) -> &'static str {
        match (self, field) {
            (Self::Required, Field::Description) => "La descripción es requerida",
            (Self::Required, _) => "La cantidad es requerida",
            (Self::NotANumber, _) => "Debe ser un número válido",
            (Self::NotPositive, _) => "La cantidad debe ser mayor a 0",
            (Self::TooLong, _) => "Máximo 100 caracteres",
        }
    }
}

/// In-progress, unsaved transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: String,
    pub kind: TransactionKind,
    pub description: String,
}

impl TransactionDraft {
    /// Raw text of a field as the user sees it.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Kind => self.kind.as_str(),
            Field::Description => &self.description,
        }
    }

    /// Length of the description in characters, for the counter under the input.
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }
}

/// Per-field errors of one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(field, err)| (*field, *err))
    }

    fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }
}

/// Checks each field independently. Never fails: the outcome is the set of
/// fields that would block a submission.
pub fn validate(draft: &TransactionDraft) -> ValidationResult {
    checked_amount(draft).err().unwrap_or_default()
}

/// The parsed amount of a draft with no field errors.
fn checked_amount(draft: &TransactionDraft) -> Result<f64, ValidationResult> {
    let mut result = ValidationResult::default();
    let amount = match parse_amount(&draft.amount) {
        Ok(amount) => Some(amount),
        Err(err) => {
            result.errors.insert(Field::Amount, err);
            None
        }
    };
    if let Err(err) = check_description(&draft.description) {
        result.errors.insert(Field::Description, err);
    }

    match amount {
        Some(amount) if result.is_valid() => Ok(amount),
        _ => Err(result),
    }
}

fn parse_amount(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    let value: f64 = trimmed.parse().map_err(|_| FieldError::NotANumber)?;
    if !value.is_finite() {
        return Err(FieldError::NotANumber);
    }
    if value <= 0.0 {
        return Err(FieldError::NotPositive);
    }
    Ok(value)
}

fn check_description(raw: &str) -> Result<(), FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }
    if raw.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(FieldError::TooLong);
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Carries the message to show the user.
    Failed(String),
}

/// Outcome of [`TransactionForm::begin_submit`].
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitStart {
    /// Validation failed. The errors are on the form and nothing must be sent.
    Invalid,
    /// A request is already in flight, or the transaction was already saved.
    Ignored,
    /// The form is now submitting; send this payload exactly once.
    Send(TransactionNew),
}

#[derive(Debug, Default)]
pub struct TransactionForm {
    draft: TransactionDraft,
    errors: ValidationResult,
    state: SubmissionState,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Replaces the value of one field and drops that field's error, if any.
    ///
    /// `Field::Kind` accepts the wire names in any case; anything else leaves
    /// the current selection untouched.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Amount => self.draft.amount = value,
            Field::Description => self.draft.description = value,
            Field::Kind => match value.parse::<TransactionKind>() {
                Ok(kind) => self.draft.kind = kind,
                Err(err) => {
                    tracing::debug!("{err}");
                    return;
                }
            },
        }
        self.errors.clear(field);
    }

    pub fn select_kind(&mut self, kind: TransactionKind) {
        self.draft.kind = kind;
        self.errors.clear(Field::Kind);
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.draft)
    }

    /// Validates the draft and, if it is clean, moves to `Submitting` and
    /// hands out the normalized payload.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if matches!(
            self.state,
            SubmissionState::Submitting | SubmissionState::Succeeded
        ) {
            tracing::debug!("submit ignored while {:?}", self.state);
            return SubmitStart::Ignored;
        }

        let amount = match checked_amount(&self.draft) {
            Ok(amount) => amount,
            Err(errors) => {
                tracing::debug!("submit blocked by {} field error(s)", errors.len());
                self.errors = errors;
                return SubmitStart::Invalid;
            }
        };
        self.errors = ValidationResult::default();

        self.state = SubmissionState::Submitting;
        SubmitStart::Send(TransactionNew {
            amount,
            kind: self.draft.kind,
            description: self.draft.description.clone(),
        })
    }

    /// Records the backend response. Results arriving when no request is in
    /// flight are ignored.
    pub fn finish(&mut self, result: Result<(), ClientError>) -> &SubmissionState {
        if !self.is_submitting() {
            tracing::debug!("dropping submit result, form is {:?}", self.state);
            return &self.state;
        }

        self.state = match result {
            Ok(()) => {
                tracing::info!("transaction registered");
                SubmissionState::Succeeded
            }
            Err(err) => {
                tracing::warn!("transaction submit failed: {err}");
                SubmissionState::Failed(failure_message(&err))
            }
        };
        &self.state
    }

    pub async fn submit<B: Backend>(&mut self, backend: &B) -> &SubmissionState {
        match self.begin_submit() {
            SubmitStart::Send(payload) => {
                let result = backend.create_transaction(payload).await;
                self.finish(result)
            }
            SubmitStart::Invalid | SubmitStart::Ignored => &self.state,
        }
    }
}

/// User-facing text for a failed submission.
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Server { .. } => err
            .server_message()
            .unwrap_or(SERVER_FALLBACK_MESSAGE)
            .to_string(),
        ClientError::Transport(_) | ClientError::InvalidUrl(_) => TRANSPORT_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use api_types::transaction::Transaction;
    use reqwest::StatusCode;

    use super::*;

    struct FakeBackend {
        calls: AtomicUsize,
        sent: Mutex<Vec<TransactionNew>>,
        reply: fn() -> Result<(), ClientError>,
    }

    impl FakeBackend {
        fn replying(reply: fn() -> Result<(), ClientError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Backend for FakeBackend {
        async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
            Ok(Vec::new())
        }

        async fn create_transaction(&self, payload: TransactionNew) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(payload);
            (self.reply)()
        }
    }

    fn draft(amount: &str, kind: TransactionKind, description: &str) -> TransactionDraft {
        TransactionDraft {
            amount: amount.to_string(),
            kind,
            description: description.to_string(),
        }
    }

    fn filled(amount: &str, kind: TransactionKind, description: &str) -> TransactionForm {
        let mut form = TransactionForm::new();
        form.set_field(Field::Amount, amount);
        form.select_kind(kind);
        form.set_field(Field::Description, description);
        form
    }

    #[test]
    fn new_draft_defaults_to_income() {
        let form = TransactionForm::new();
        assert_eq!(form.draft().kind, TransactionKind::Income);
        assert_eq!(form.draft().amount, "");
        assert_eq!(form.state(), &SubmissionState::Idle);
    }

    #[test]
    fn blank_amount_is_required() {
        for amount in ["", " ", "\t", "   \n "] {
            let result = validate(&draft(amount, TransactionKind::Expense, "ok"));
            assert_eq!(result.get(Field::Amount), Some(FieldError::Required), "{amount:?}");
            assert_eq!(result.len(), 1);
        }
    }

    #[test]
    fn blank_amount_and_blank_description_both_reported() {
        let result = validate(&draft(" ", TransactionKind::Expense, "  "));
        assert_eq!(result.get(Field::Amount), Some(FieldError::Required));
        assert_eq!(result.get(Field::Description), Some(FieldError::Required));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        for amount in ["abc", "12,50", "1.2.3", "L 10", "NaN", "inf", "--1", "10abc"] {
            let result = validate(&draft(amount, TransactionKind::Income, "ok"));
            assert_eq!(result.get(Field::Amount), Some(FieldError::NotANumber), "{amount:?}");
        }
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in ["0", "-5", "-0", "0.00", "-0.01", " -100 "] {
            let result = validate(&draft(amount, TransactionKind::Income, "ok"));
            assert_eq!(result.get(Field::Amount), Some(FieldError::NotPositive), "{amount:?}");
        }
    }

    #[test]
    fn positive_amount_has_no_error() {
        for amount in ["0.01", "1", "1500.50", " 42 ", "1e3", ".5"] {
            let result = validate(&draft(amount, TransactionKind::Income, "ok"));
            assert_eq!(result.get(Field::Amount), None, "{amount:?}");
        }
    }

    #[test]
    fn description_length_bounds() {
        for len in [1, 2, 50, 99, 100] {
            let description = "a".repeat(len);
            let result = validate(&draft("1", TransactionKind::Income, &description));
            assert!(result.is_valid(), "len {len}");
        }

        let result = validate(&draft("1", TransactionKind::Income, ""));
        assert_eq!(result.get(Field::Description), Some(FieldError::Required));

        let result = validate(&draft("1", TransactionKind::Income, &"a".repeat(101)));
        assert_eq!(result.get(Field::Description), Some(FieldError::TooLong));
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        let description = "ñ".repeat(100);
        let result = validate(&draft("1", TransactionKind::Income, &description));
        assert!(result.is_valid());
    }

    #[test]
    fn negative_amount_is_not_positive() {
        let result = validate(&draft("-5", TransactionKind::Transfer, "y"));
        assert_eq!(result.get(Field::Amount), Some(FieldError::NotPositive));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = TransactionForm::new();
        assert_eq!(form.begin_submit(), SubmitStart::Invalid);
        assert_eq!(form.errors().len(), 2);

        form.set_field(Field::Amount, "abc");
        assert_eq!(form.errors().get(Field::Amount), None);
        assert_eq!(form.errors().get(Field::Description), Some(FieldError::Required));
    }

    #[test]
    fn errors_are_recomputed_on_each_attempt() {
        let mut form = filled("abc", TransactionKind::Income, "");
        assert_eq!(form.begin_submit(), SubmitStart::Invalid);
        assert_eq!(form.errors().get(Field::Amount), Some(FieldError::NotANumber));

        form.set_field(Field::Description, "ok");
        form.set_field(Field::Amount, "-1");
        assert_eq!(form.begin_submit(), SubmitStart::Invalid);
        assert_eq!(form.errors().get(Field::Amount), Some(FieldError::NotPositive));
        assert_eq!(form.errors().get(Field::Description), None);
    }

    #[test]
    fn clean_attempt_sends_validated_amount_and_clears_errors() {
        let mut form = filled("", TransactionKind::Income, "");
        assert_eq!(form.begin_submit(), SubmitStart::Invalid);

        form.set_field(Field::Amount, "  1500.50 ");
        form.set_field(Field::Description, "Ventas");
        match form.begin_submit() {
            SubmitStart::Send(payload) => assert_eq!(payload.amount, 1500.5),
            other => panic!("expected a payload, got {other:?}"),
        }
        assert!(form.errors().is_empty());
    }

    #[test]
    fn kind_field_accepts_any_case_and_ignores_unknown() {
        let mut form = TransactionForm::new();
        form.set_field(Field::Kind, "GASTO");
        assert_eq!(form.draft().kind, TransactionKind::Expense);
        form.set_field(Field::Kind, "donacion");
        assert_eq!(form.draft().kind, TransactionKind::Expense);
    }

    #[test]
    fn second_begin_while_submitting_is_ignored() {
        let mut form = filled("10", TransactionKind::Expense, "pan");
        assert!(matches!(form.begin_submit(), SubmitStart::Send(_)));
        assert_eq!(form.begin_submit(), SubmitStart::Ignored);
        assert!(form.is_submitting());
    }

    #[test]
    fn finish_without_request_is_ignored() {
        let mut form = TransactionForm::new();
        assert_eq!(form.finish(Ok(())), &SubmissionState::Idle);
    }

    #[test]
    fn failure_message_prefers_server_text() {
        let err = ClientError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some("Monto fuera de rango".to_string()),
        };
        assert_eq!(failure_message(&err), "Monto fuera de rango");

        let err = ClientError::Server {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(failure_message(&err), "Error al registrar transacción");
    }

    #[tokio::test]
    async fn valid_draft_is_posted() {
        let backend = FakeBackend::replying(|| Ok(()));
        let mut form = filled("1500.50", TransactionKind::Income, "Ventas de paleta");
        assert!(form.validate().is_valid());

        let state = form.submit(&backend).await.clone();
        assert_eq!(state, SubmissionState::Succeeded);
        assert_eq!(backend.calls(), 1);
        assert_eq!(
            backend.sent.lock().unwrap()[0],
            TransactionNew {
                amount: 1500.50,
                kind: TransactionKind::Income,
                description: "Ventas de paleta".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn invalid_draft_makes_no_call() {
        let backend = FakeBackend::replying(|| Ok(()));
        let mut form = filled("", TransactionKind::Expense, "x");

        let state = form.submit(&backend).await.clone();
        assert_eq!(state, SubmissionState::Idle);
        assert_eq!(backend.calls(), 0);
        assert_eq!(form.errors().get(Field::Amount), Some(FieldError::Required));
        assert_eq!(form.errors().len(), 1);
    }

    #[tokio::test]
    async fn submit_while_submitting_makes_no_call() {
        let backend = FakeBackend::replying(|| Ok(()));
        let mut form = filled("20", TransactionKind::Transfer, "ahorro");
        assert!(matches!(form.begin_submit(), SubmitStart::Send(_)));

        form.submit(&backend).await;
        assert_eq!(backend.calls(), 0);
        assert!(form.is_submitting());
    }

    #[tokio::test]
    async fn server_rejection_fails_with_server_message() {
        let backend = FakeBackend::replying(|| {
            Err(ClientError::Server {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: Some("Saldo insuficiente".to_string()),
            })
        });
        let mut form = filled("20", TransactionKind::Expense, "renta");

        let state = form.submit(&backend).await.clone();
        assert_eq!(state, SubmissionState::Failed("Saldo insuficiente".to_string()));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn failed_form_can_be_resubmitted_by_the_user() {
        let backend = FakeBackend::replying(|| {
            Err(ClientError::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            })
        });
        let mut form = filled("20", TransactionKind::Expense, "renta");

        form.submit(&backend).await;
        form.submit(&backend).await;
        assert_eq!(backend.calls(), 2);
        assert_eq!(
            form.state(),
            &SubmissionState::Failed("Error al registrar transacción".to_string())
        );
    }

    #[tokio::test]
    async fn succeeded_form_does_not_submit_again() {
        let backend = FakeBackend::replying(|| Ok(()));
        let mut form = filled("20", TransactionKind::Income, "sueldo");

        form.submit(&backend).await;
        form.submit(&backend).await;
        assert_eq!(backend.calls(), 1);
        assert_eq!(form.state(), &SubmissionState::Succeeded);
    }
}
