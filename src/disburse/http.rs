//! HTTP disbursement client.
//!
//! Sends the withdrawal to an external disbursement endpoint as a JSON POST.
//! Any transport error, timeout, or non-2xx response is reported as a
//! [`DisburseError`], which the coordinator turns into a compensated failure.

use crate::disburse::{DisburseError, Disburser};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Per-request timeout. A disbursement slower than this counts as failed.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Body posted to the disbursement endpoint.
#[derive(Debug, Serialize)]
struct DisburseBody {
    account_id: Uuid,
    amount_cents: i64,
}

/// Disburser that POSTs each withdrawal to a configured HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpDisburser {
    client: reqwest::Client,
    url: String,
}

impl HttpDisburser {
    /// Build a disburser for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid absolute http/https URL or
    /// the HTTP client cannot be constructed.
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("disbursement URL must use http or https: {url}");
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Disburser for HttpDisburser {
    async fn disburse(&self, account_id: Uuid, amount_cents: i64) -> Result<(), DisburseError> {
        let response = self
            .client
            .post(&self.url)
            .json(&DisburseBody {
                account_id,
                amount_cents,
            })
            .send()
            .await
            .map_err(|e| DisburseError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DisburseError::Rejected(format!("{status}: {body}")));
        }

        Ok(())
    }
}
