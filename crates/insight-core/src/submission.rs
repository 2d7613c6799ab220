//! Best-effort forwarding of login details to an external endpoint.
//!
//! Login never waits on or fails because of this: the request runs on its
//! own thread and its outcome is only logged.

use crate::error::{InsightError, Result};
use crate::identity::ValidLogin;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub consent: bool,
}

impl LoginPayload {
    pub fn new(login: &ValidLogin, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: login.name.clone(),
            email: login.email.clone(),
            timestamp,
            consent: true,
        }
    }
}

pub trait Submitter: Send + Sync {
    fn submit(&self, payload: &LoginPayload) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HttpSubmitter
// ---------------------------------------------------------------------------

/// POSTs the payload as JSON. The response body and status are not
/// inspected; only a failure to deliver the request counts as an error.
pub struct HttpSubmitter {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InsightError::SubmissionFailed(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl Submitter for HttpSubmitter {
    fn submit(&self, payload: &LoginPayload) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| InsightError::SubmissionFailed(e.to_string()))?;
        tracing::debug!(status = %resp.status(), "login submission delivered");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Background submission
// ---------------------------------------------------------------------------

/// Receiver side of a submission running in the background.
#[derive(Debug)]
pub struct SubmissionHandle {
    rx: mpsc::Receiver<Result<()>>,
}

impl SubmissionHandle {
    /// Wait up to `timeout` for the submission to settle. Returns `true` if
    /// it completed successfully. Failures and timeouts are logged, never
    /// returned.
    pub fn wait(self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "login submission failed; access was granted anyway");
                false
            }
            Err(_) => {
                tracing::warn!(?timeout, "login submission did not finish in time");
                false
            }
        }
    }
}

/// Start `submitter` on its own thread and return immediately.
pub fn spawn(submitter: Arc<dyn Submitter>, payload: LoginPayload) -> SubmissionHandle {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let outcome = submitter.submit(&payload);
        // The receiver may already be gone; nobody is waiting then.
        let _ = tx.send(outcome);
    });
    SubmissionHandle { rx }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Submitter for Failing {
        fn submit(&self, _payload: &LoginPayload) -> Result<()> {
            Err(InsightError::SubmissionFailed("connection refused".to_string()))
        }
    }

    fn payload() -> LoginPayload {
        LoginPayload::new(
            &ValidLogin {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn payload_serializes_expected_fields() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["consent"], true);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn http_submitter_posts_json() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/sheet")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com",
                "consent": true,
            })))
            .with_status(200)
            .create();

        let submitter =
            HttpSubmitter::new(format!("{}/sheet", server.url()), Duration::from_secs(5)).unwrap();
        submitter.submit(&payload()).unwrap();
        mock.assert();
    }

    #[test]
    fn http_status_is_not_inspected() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(500).create();
        let submitter = HttpSubmitter::new(server.url(), Duration::from_secs(5)).unwrap();
        assert!(submitter.submit(&payload()).is_ok());
        mock.assert();
    }

    #[test]
    fn unreachable_endpoint_is_submission_failed() {
        let submitter =
            HttpSubmitter::new("http://127.0.0.1:9/unreachable", Duration::from_secs(2)).unwrap();
        let err = submitter.submit(&payload()).unwrap_err();
        assert!(matches!(err, InsightError::SubmissionFailed(_)));
    }

    #[test]
    fn background_failure_is_swallowed() {
        let handle = spawn(Arc::new(Failing), payload());
        assert!(!handle.wait(Duration::from_secs(5)));
    }

    #[test]
    fn background_success_reports_true() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(204).create();
        let submitter = HttpSubmitter::new(server.url(), Duration::from_secs(5)).unwrap();
        let handle = spawn(Arc::new(submitter), payload());
        assert!(handle.wait(Duration::from_secs(5)));
        mock.assert();
    }
}
