pub mod error;
pub mod types;

pub use error::{IndexerError, Result};
pub use types::{IndexEnvelope, InputRecord, StatusResponse};

use std::collections::HashMap;
use std::path::Path;

use reqwest::multipart::{Form, Part};

/// HTTP client for the content-indexing backend.
///
/// Each call is an independent round trip: no retries, no caching, no state
/// held between calls, and no timeout at this layer. Submission calls are
/// fire-and-forget: a success means the backend accepted the request for
/// processing, not that indexing has finished.
pub struct IndexerClient {
    client: reqwest::Client,
    base_url: String,
}

impl IndexerClient {
    /// Client with a default transport. The base address comes from
    /// external configuration.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client over an explicitly supplied transport handle. This is the
    /// injection point: tests pass a handle bound to a fake backend.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch every known input from `GET /inputs`.
    ///
    /// An empty backend result is an empty `Vec`, not an error. Callers
    /// filter and sort the returned sequence themselves; nothing is cached,
    /// so fresh data means calling again.
    pub async fn list_inputs(&self) -> Result<Vec<InputRecord>> {
        let url = format!("{}/inputs", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let inputs: Vec<InputRecord> = resp.json().await?;
        tracing::debug!(count = inputs.len(), "Fetched input listing");
        Ok(inputs)
    }

    /// Fetch a single input by its request id from `GET /inputs/{id}`.
    pub async fn get_input(&self, request_id: &str) -> Result<InputRecord> {
        let url = format!("{}/inputs/{}", self.base_url, request_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch all inputs currently in the given processing status from
    /// `GET /inputs/status/{status}`.
    pub async fn inputs_by_status(&self, status: &str) -> Result<Vec<InputRecord>> {
        let url = format!("{}/inputs/status/{}", self.base_url, status);
        let resp = self.client.get(&url).send().await?;

        let http_status = resp.status();
        if !http_status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: http_status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Total number of known inputs, via `GET /inputs/count`.
    pub async fn count(&self) -> Result<u64> {
        let url = format!("{}/inputs/count", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Number of inputs in each processing status, via
    /// `GET /inputs/count-by-status`.
    pub async fn count_by_status(&self) -> Result<HashMap<String, u64>> {
        let url = format!("{}/inputs/count-by-status", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Point-in-time processing status of one submission, via
    /// `GET /status/{request_id}`. An unknown id is a backend 404.
    pub async fn status(&self, request_id: &str) -> Result<String> {
        let url = format!("{}/status/{}", self.base_url, request_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body: StatusResponse = resp.json().await?;
        Ok(body.status)
    }

    /// Submit a URL or plain note for asynchronous indexing via
    /// `POST /index`. The string travels in a `{"input": ...}` envelope.
    pub async fn submit_text(&self, input: &str) -> Result<()> {
        if input.is_empty() {
            return Err(IndexerError::Validation(
                "input text must not be empty".to_string(),
            ));
        }

        let url = format!("{}/index", self.base_url);
        let body = IndexEnvelope {
            input: input.to_string(),
        };

        tracing::info!(len = input.len(), "Submitting text for indexing");
        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Submit a document for asynchronous indexing via `POST /index_file`.
    ///
    /// The file is opened here and streamed exactly once as the multipart
    /// part named `"file"`, with the declared filename and content type.
    /// The handle is scoped to this call and released whether the upload
    /// succeeds or fails.
    pub async fn submit_file(
        &self,
        file_name: &str,
        file: &Path,
        content_type: &str,
    ) -> Result<()> {
        let handle = tokio::fs::File::open(file).await.map_err(|e| {
            IndexerError::Validation(format!("cannot open {}: {e}", file.display()))
        })?;

        let part = Part::stream(reqwest::Body::from(handle))
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| {
                IndexerError::Validation(format!("invalid content type {content_type}: {e}"))
            })?;
        let form = Form::new().part("file", part);

        let url = format!("{}/index_file", self.base_url);
        tracing::info!(file_name, content_type, "Submitting file for indexing");
        let resp = self.client.post(&url).multipart(form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IndexerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
