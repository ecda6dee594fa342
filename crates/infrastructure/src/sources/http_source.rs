//! Remote control-plane experiment source
//!
//! Fetches experiment definitions over HTTP. Every failure mode (connect
//! error, non-success status, malformed payload, slow server) degrades to an
//! empty experiment set; the bound on a single fetch is enforced by the
//! request timeout configured at construction.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Experiment, ExperimentWire};
use thiserror::Error;
use tracing::{debug, warn};

use application::ExperimentSource;

/// Errors constructing the source
///
/// Construction is the only fallible path; fetching is fail-open.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Experiment source backed by a remote control plane
///
/// Expects `GET {endpoint}/experiments?checkpoint={name}` to return a JSON
/// array of experiment definitions. Individually malformed entries are
/// skipped so one bad definition cannot take down the rest.
#[derive(Debug, Clone)]
pub struct HttpExperimentSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExperimentSource {
    /// Create a source against the given control-plane base URL
    ///
    /// `fetch_timeout` bounds the whole request, connect time included.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Client`] when the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, fetch_timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .connect_timeout(fetch_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_wire(&self, checkpoint: &str) -> Result<Vec<ExperimentWire>, reqwest::Error> {
        let url = format!("{}/experiments", self.endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("checkpoint", checkpoint)])
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }
}

#[async_trait]
impl ExperimentSource for HttpExperimentSource {
    async fn fetch(&self, checkpoint: &str) -> Vec<Experiment> {
        let wire = match self.fetch_wire(checkpoint).await {
            Ok(wire) => wire,
            Err(error) => {
                warn!(%checkpoint, %error, "experiment fetch failed, continuing without experiments");
                return Vec::new();
            }
        };

        let mut experiments = Vec::with_capacity(wire.len());
        for entry in wire {
            match Experiment::try_from(entry) {
                Ok(experiment) => experiments.push(experiment),
                Err(error) => {
                    warn!(%checkpoint, %error, "skipping malformed experiment definition");
                }
            }
        }
        debug!(%checkpoint, count = experiments.len(), "experiments fetched");
        experiments
    }
}
