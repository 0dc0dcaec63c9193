use std::time::Duration;

use api_types::{
    error::ErrorBody,
    transaction::{Transaction, TransactionNew},
};
use reqwest::{Response, Url};

use crate::{Backend, ClientError};

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    /// Builds a client for `base_url` (e.g. `http://localhost:8000`).
    ///
    /// Without a `timeout` requests wait as long as the transport allows.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        tracing::debug!("GET {endpoint}");

        let res = self.http.get(endpoint).send().await?;
        if res.status().is_success() {
            return Ok(res.json::<Vec<Transaction>>().await?);
        }
        Err(server_error(res).await)
    }

    async fn post_transaction(&self, payload: TransactionNew) -> Result<(), ClientError> {
        let endpoint = self.endpoint("transaction")?;
        tracing::debug!("POST {endpoint}");

        let res = self.http.post(endpoint).json(&payload).send().await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(server_error(res).await)
    }
}

impl Backend for HttpClient {
    fn list_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send {
        self.fetch_transactions()
    }

    fn create_transaction(
        &self,
        payload: TransactionNew,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        self.post_transaction(payload)
    }
}

/// `Url::join` drops the last path segment unless it ends with `/`, so a
/// base like `http://host/api` must become `http://host/api/`.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|err| ClientError::InvalidUrl(err.to_string()))
}

async fn server_error(res: Response) -> ClientError {
    let status = res.status();
    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty());
    tracing::debug!("request failed with {status}");
    ClientError::Server { status, message }
}
