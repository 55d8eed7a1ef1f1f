//! Disbursement action: the external side effect of a withdrawal.
//!
//! The coordinator treats disbursement as an opaque capability that either
//! succeeds or fails with a reported reason. The capability is supplied at
//! construction time, so tests inject mocks and production wires the HTTP
//! client; there is no process-wide override.

mod http;

pub use http::HttpDisburser;

use async_trait::async_trait;
use uuid::Uuid;

/// Error reported by a disbursement attempt.
///
/// A timeout is treated identically to any other failure: the coordinator
/// compensates and reports the withdrawal as failed. Retrying is the
/// disbursement provider's concern, never the coordinator's.
#[derive(Debug, thiserror::Error)]
pub enum DisburseError {
    /// The disbursement provider could not be reached or did not answer in time.
    #[error("disbursement request failed: {0}")]
    Transport(String),

    /// The disbursement provider answered with a non-success status.
    #[error("disbursement rejected: {0}")]
    Rejected(String),
}

/// Capability that moves the withdrawn funds out of the system.
#[async_trait]
pub trait Disburser: Send + Sync {
    async fn disburse(&self, account_id: Uuid, amount_cents: i64) -> Result<(), DisburseError>;
}

/// Disburser that acknowledges every withdrawal without any outbound call.
///
/// Used when no `DISBURSEMENT_URL` is configured, e.g. in local development.
#[derive(Debug, Default)]
pub struct NoopDisburser;

#[async_trait]
impl Disburser for NoopDisburser {
    async fn disburse(&self, account_id: Uuid, amount_cents: i64) -> Result<(), DisburseError> {
        tracing::debug!(%account_id, amount_cents, "disbursement acknowledged (noop)");
        Ok(())
    }
}
