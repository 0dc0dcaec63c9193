use api_types::transaction::{Transaction, TransactionNew};

use crate::ClientError;

/// Remote service holding the transactions.
///
/// [`crate::HttpClient`] is the production implementation; the futures are
/// `Send` so the front end can run them on spawned tasks.
pub trait Backend {
    /// `GET /transactions`: the full collection, in server order.
    fn list_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    /// `POST /transaction`: any success status counts as created.
    fn create_transaction(
        &self,
        payload: TransactionNew,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
