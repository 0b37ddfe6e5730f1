// Test mocks for the drop zone.
//
// MockSubmitter implements InputSubmitter without any I/O: it records every
// submission it receives and can be gated so an upload stays in flight
// until the test releases it, or made to fail outright.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use indexer_client::IndexerError;

use crate::InputSubmitter;

/// One call the mock received, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: String,
}

#[derive(Default)]
pub struct MockSubmitter {
    calls: Mutex<Vec<SubmittedFile>>,
    gate: Option<Arc<Notify>>,
    fail: bool,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every submission in flight until the test fires `gate`.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Fail every submission with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Everything submitted so far, in call order.
    pub fn calls(&self) -> Vec<SubmittedFile> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InputSubmitter for MockSubmitter {
    async fn submit_file(
        &self,
        file_name: &str,
        file: &std::path::Path,
        content_type: &str,
    ) -> Result<(), IndexerError> {
        self.calls.lock().unwrap().push(SubmittedFile {
            file_name: file_name.to_string(),
            path: file.to_path_buf(),
            content_type: content_type.to_string(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail {
            return Err(IndexerError::Network("mock transport down".to_string()));
        }
        Ok(())
    }
}

/// A picked file pointing at a path that never gets opened by the mock.
pub fn picked_pdf(name: &str) -> crate::PickedFile {
    crate::PickedFile {
        name: name.to_string(),
        path: PathBuf::from(format!("/tmp/{name}")),
        content_type: "application/pdf".to_string(),
    }
}
