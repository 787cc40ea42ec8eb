//! HTTP client for the rollup coordinator.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use auction_core::Status;
use auction_protocol::rollup::{FinishRequest, ReportRequest, FINISH_PATH, REPORT_PATH};

use crate::coordinator::{classify_failure, classify_finish, Coordinator, FinishResponse, TransportError};

/// [`Coordinator`] backed by the rollup HTTP server.
///
/// `/finish` blocks until the coordinator has the next input and has no
/// overall deadline. Only connection setup and `/report` are bounded by
/// `timeout`.
#[derive(Debug, Clone)]
pub struct HttpCoordinator {
    client: reqwest::Client,
    finish_url: String,
    report_url: String,
    report_timeout: Duration,
}

impl HttpCoordinator {
    /// `server_url` is the base URL, e.g. `http://127.0.0.1:5004`.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| TransportError::Terminal(format!("failed to build HTTP client: {}", e)))?;

        let base = server_url.trim_end_matches('/');
        Ok(HttpCoordinator {
            client,
            finish_url: format!("{}{}", base, FINISH_PATH),
            report_url: format!("{}{}", base, REPORT_PATH),
            report_timeout: timeout,
        })
    }

    pub fn finish_url(&self) -> &str {
        &self.finish_url
    }

    pub fn report_url(&self) -> &str {
        &self.report_url
    }
}

#[async_trait]
impl Coordinator for HttpCoordinator {
    async fn finish(&mut self, status: Status) -> Result<FinishResponse, TransportError> {
        debug!(status = status.as_str(), "finishing request");

        let response = self
            .client
            .post(&self.finish_url)
            .json(&FinishRequest { status })
            .send()
            .await
            .map_err(finish_error)?;

        let code = response.status().as_u16();
        let body = response.text().await.map_err(finish_error)?;
        classify_finish(code, &body)
    }

    async fn report(&mut self, payload: String) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.report_url)
            .timeout(self.report_timeout)
            .json(&ReportRequest { payload })
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status.as_u16(), &body))
    }
}

/// A `/finish` that timed out after being sent may have consumed an
/// input and is not retried. Connect failures are.
fn finish_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() && !err.is_connect() {
        TransportError::Terminal(format!("finish timed out after the request was sent: {}", err))
    } else {
        from_reqwest(err)
    }
}

fn from_reqwest(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Terminal(err.to_string())
    } else {
        TransportError::Transient(err.to_string())
    }
}
