//! Remote extractor — forwards the uploaded document to an external extraction
//! service and deserializes its JSON answer into `ExtractedResume`.
//!
//! Retries on 429 (rate limit) and 5xx errors with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use tracing::{debug, warn};

use crate::extraction::{ExtractedResume, ExtractionError, ResumeExtractor};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);

#[derive(Clone)]
pub struct RemoteExtractor {
    client: Client,
    endpoint: String,
    backoff: Duration,
}

impl RemoteExtractor {
    pub fn new(endpoint: String) -> Result<Self, ExtractionError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint,
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Base delay before the first retry; doubles on each further attempt.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn form(document: &Bytes, file_name: &str) -> multipart::Form {
        let part = multipart::Part::bytes(document.to_vec()).file_name(file_name.to_string());
        multipart::Form::new().part("resume", part)
    }
}

#[async_trait]
impl ResumeExtractor for RemoteExtractor {
    async fn extract(
        &self,
        document: Bytes,
        file_name: &str,
    ) -> Result<ExtractedResume, ExtractionError> {
        if document.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let mut last_error: Option<ExtractionError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "Extraction attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // multipart::Form is consumed by send(), so it is rebuilt per attempt
            let response = self
                .client
                .post(&self.endpoint)
                .multipart(Self::form(&document, file_name))
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ExtractionError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Extraction service returned {}: {}", status, body);
                last_error = Some(ExtractionError::Service {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ExtractionError::Service {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.bytes().await?;
            let extracted = serde_json::from_slice::<ExtractedResume>(&body)?.bounded();

            debug!(
                "Remote extraction succeeded for '{}': {} skills",
                file_name,
                extracted.skills.len()
            );

            return Ok(extracted);
        }

        Err(last_error.unwrap_or(ExtractionError::Service {
            status: 0,
            message: format!("no response after {MAX_RETRIES} attempts"),
        }))
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
