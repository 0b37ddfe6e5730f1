#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use indexer_client::{IndexerClient, IndexerError};

/// Seam between the drop zone and whatever actually ships the file.
/// Implemented for [`IndexerClient`]; tests substitute a recording mock.
#[async_trait]
pub trait InputSubmitter: Send + Sync {
    async fn submit_file(
        &self,
        file_name: &str,
        file: &std::path::Path,
        content_type: &str,
    ) -> Result<(), IndexerError>;
}

#[async_trait]
impl InputSubmitter for IndexerClient {
    async fn submit_file(
        &self,
        file_name: &str,
        file: &std::path::Path,
        content_type: &str,
    ) -> Result<(), IndexerError> {
        IndexerClient::submit_file(self, file_name, file, content_type).await
    }
}

/// Current mode of the drop zone. What the host renders for each state is
/// its own business; this machine only tracks transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropState {
    Idle,
    Dragging,
    Uploading,
}

/// A file resolved from a user gesture (a drop, or a picker the host ran
/// after a click).
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
    pub content_type: String,
}

/// Finite state machine mediating file selection via drag-and-drop or
/// click-to-browse.
///
/// At most one upload is in flight per instance: a drop or pick that
/// arrives while `Uploading` is ignored outright, with no queuing and no
/// cancellation of the in-flight request. Independent instances share
/// nothing and never block each other.
///
/// Every transition is published on a watch channel so a host UI can
/// subscribe and re-render from the state alone.
pub struct DropZone<S: InputSubmitter> {
    submitter: Arc<S>,
    // Transition truth. Locked only for check-and-set, never across an await.
    state: Mutex<DropState>,
    changes: watch::Sender<DropState>,
}

impl<S: InputSubmitter> DropZone<S> {
    pub fn new(submitter: Arc<S>) -> Self {
        let (changes, _) = watch::channel(DropState::Idle);
        Self {
            submitter,
            state: Mutex::new(DropState::Idle),
            changes,
        }
    }

    pub fn state(&self) -> DropState {
        *self.state.lock().unwrap()
    }

    /// Observe every state change, starting from the current state.
    pub fn subscribe(&self) -> watch::Receiver<DropState> {
        self.changes.subscribe()
    }

    /// A drag carrying a file payload entered the zone.
    pub fn drag_enter(&self) {
        let mut state = self.state.lock().unwrap();
        if *state == DropState::Idle {
            *state = DropState::Dragging;
            self.changes.send_replace(DropState::Dragging);
        }
    }

    /// The drag left the zone without dropping.
    pub fn drag_leave(&self) {
        let mut state = self.state.lock().unwrap();
        if *state == DropState::Dragging {
            *state = DropState::Idle;
            self.changes.send_replace(DropState::Idle);
        }
    }

    /// Drag-over is accepted only so the host can suppress default
    /// handling. Never a transition.
    pub fn drag_over(&self) {}

    /// A file was dropped on the zone. Returns `None` if the drop was
    /// ignored because an upload is already in flight; otherwise the
    /// submission outcome, after the machine has settled back to `Idle`.
    pub async fn drop_file(&self, file: PickedFile) -> Option<Result<(), IndexerError>> {
        self.upload(file).await
    }

    /// Click path: the host ran its file picker and this is what came
    /// back. A cancelled picker (`None`) is a no-op — the zone stays
    /// `Idle` and nothing is submitted.
    pub async fn file_picked(
        &self,
        picked: Option<PickedFile>,
    ) -> Option<Result<(), IndexerError>> {
        let file = picked?;
        self.upload(file).await
    }

    async fn upload(&self, file: PickedFile) -> Option<Result<(), IndexerError>> {
        if !self.begin_upload() {
            debug!(file = %file.name, "Upload already in flight, gesture ignored");
            return None;
        }

        let result = self
            .submitter
            .submit_file(&file.name, &file.path, &file.content_type)
            .await;

        // Success or failure, the machine settles to Idle; error reporting
        // belongs to the caller.
        self.settle();
        Some(result)
    }

    /// Enter `Uploading` unless already there. The check and the set happen
    /// under one lock, which is the whole one-in-flight guarantee.
    fn begin_upload(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if *state == DropState::Uploading {
            return false;
        }
        *state = DropState::Uploading;
        // send_replace stores the value even with no live receivers, so a
        // late subscriber still starts from the real current state.
        self.changes.send_replace(DropState::Uploading);
        true
    }

    fn settle(&self) {
        let mut state = self.state.lock().unwrap();
        *state = DropState::Idle;
        self.changes.send_replace(DropState::Idle);
    }
}
