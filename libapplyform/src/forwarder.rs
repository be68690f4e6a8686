//! Optional delivery of accepted records to a remote endpoint
//!
//! Delivery is fire-and-forget: [`spawn_forward`] detaches a task whose only
//! observable outcome is a log line. Local persistence never waits on it.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{ForwardError, Result};
use crate::types::ApplicationRecord;

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Deliver one record
    async fn forward(&self, record: &ApplicationRecord) -> Result<()>;

    /// Where records are sent, for logs and status messages
    fn destination(&self) -> &str;
}

/// POSTs each record as JSON to a fixed URL
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpForwarder {
    /// Fails when `endpoint` is not an absolute URL
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| ForwardError::Client(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForwardError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, record: &ApplicationRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status.as_u16()).into());
        }

        Ok(())
    }

    fn destination(&self) -> &str {
        &self.endpoint
    }
}

/// Send `record` in the background; failures are logged as warnings
///
/// The handle may be awaited (a CLI does so before exiting) or dropped.
pub fn spawn_forward(forwarder: Arc<dyn Forwarder>, record: ApplicationRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        match forwarder.forward(&record).await {
            Ok(()) => debug!(
                "Forwarded application from {} to {}",
                record.submitted_at,
                forwarder.destination()
            ),
            Err(e) => warn!("Failed posting to endpoint {}: {}", forwarder.destination(), e),
        }
    })
}
