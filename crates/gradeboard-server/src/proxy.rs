//! Relay for evaluation triggers.
//!
//! Deliberately a dumb pipe: the upstream's status, body, and headers come
//! back unmodified, and nothing is retried. Only a transport failure becomes
//! a local error, so callers can tell "the evaluator said no" apart from
//! "the evaluator never answered".

use reqwest::header::{HeaderName, CONNECTION, TRANSFER_ENCODING};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    /// The outbound call could not be completed (connect failure, timeout).
    #[error("evaluator unreachable: {0}")]
    Unreachable(String),
}

/// An upstream response captured for verbatim relay.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: u16,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EvaluatorClient {
    client: reqwest::Client,
    base_url: String,
}

impl EvaluatorClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POSTs `evaluate/subject/{id}` upstream and captures whatever comes
    /// back, success or error status alike.
    pub async fn trigger_subject_evaluation(
        &self,
        subject_id: Uuid,
    ) -> Result<RelayedResponse, EvaluatorError> {
        let url = format!("{}/evaluate/subject/{}", self.base_url, subject_id);
        let resp = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| EvaluatorError::Unreachable(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            // hop-by-hop headers do not survive the relay buffering the body
            .filter(|(name, _)| !is_hop_by_hop(name))
            .map(|(name, value)| (name.to_string(), value.as_bytes().to_vec()))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| EvaluatorError::Unreachable(e.to_string()))?
            .to_vec();

        Ok(RelayedResponse {
            status,
            headers,
            body,
        })
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    *name == TRANSFER_ENCODING || *name == CONNECTION
}
