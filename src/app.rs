use crate::history::{render_history, HistoryStore, UploadRecord};
use crate::uploader::{Upload, UploadError};
use std::path::PathBuf;

pub const RESULT_LABEL: &str = "Uploaded File URL:";

/// Where the main window is in the upload workflow.
///
/// `FilePicking` and `NotePrompt` are requests to the shell: it shows the
/// picker or note dialog and feeds the answer back through
/// [`AppState::file_picked`] or [`AppState::submit_note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FilePicking,
    Uploading(PathBuf),
    NotePrompt { url: String },
    Error { title: String, message: String },
}

/// Contents of an open history viewer, rendered once when it was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub text: String,
    pub records: Vec<UploadRecord>,
}

/// Display-free state of the uploader window.
pub struct AppState {
    pub phase: Phase,
    result_label: String,
    pub url_field: String,
    pub history_view: Option<HistoryView>,
    store: HistoryStore,
    quit_requested: bool,
}

impl AppState {
    pub fn new(store: HistoryStore) -> Self {
        Self {
            phase: Phase::Idle,
            result_label: RESULT_LABEL.into(),
            url_field: String::new(),
            history_view: None,
            store,
            quit_requested: false,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Caption shown above the URL field.
    pub fn result_label(&self) -> &str {
        &self.result_label
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn request_upload(&mut self) {
        if self.is_idle() {
            self.phase = Phase::FilePicking;
        }
    }

    pub fn file_picked(&mut self, path: Option<PathBuf>) {
        if self.phase != Phase::FilePicking {
            return;
        }
        self.phase = match path {
            Some(p) => Phase::Uploading(p),
            None => {
                tracing::debug!("no file selected by the user");
                Phase::Idle
            }
        };
    }

    /// Run the pending upload. Blocks until the request completes.
    pub fn perform_upload(&mut self, uploader: &dyn Upload) {
        let Phase::Uploading(path) = &self.phase else {
            return;
        };
        self.phase = match uploader.upload(path) {
            Ok(url) => {
                tracing::info!(url = %url, "upload finished");
                self.result_label = RESULT_LABEL.into();
                self.url_field = url.clone();
                Phase::NotePrompt { url }
            }
            Err(e @ UploadError::Failed { .. }) => {
                tracing::warn!("upload rejected: {e}");
                Phase::Error {
                    title: "Upload Failed".into(),
                    message: e.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("an error occurred: {e}");
                Phase::Error {
                    title: "Error".into(),
                    message: format!("An error occurred: {e}"),
                }
            }
        };
    }

    /// Store the note for the finished upload. `None` means the prompt was
    /// cancelled and is saved as an empty note. Returns whether the record was
    /// written.
    pub fn submit_note(&mut self, note: Option<String>) -> bool {
        let Phase::NotePrompt { url } = &self.phase else {
            return false;
        };
        let note = note.unwrap_or_default();
        match self.store.append(url, &note) {
            Ok(()) => {
                self.phase = Phase::Idle;
                true
            }
            Err(e) => {
                tracing::error!("failed to save history: {e:#}");
                self.phase = history_error(&e);
                false
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, Phase::Error { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// Open a fresh history viewer from the file on disk.
    pub fn view_history(&mut self) {
        if !self.is_idle() {
            return;
        }
        match self.store.load() {
            Ok(records) => {
                self.history_view = Some(HistoryView {
                    text: render_history(&records),
                    records,
                });
            }
            Err(e) => {
                tracing::error!("failed to load history: {e:#}");
                self.history_view = None;
                self.phase = history_error(&e);
            }
        }
    }

    pub fn close_history(&mut self) {
        self.history_view = None;
    }

    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn history_error(e: &anyhow::Error) -> Phase {
    Phase::Error {
        title: "History Error".into(),
        message: format!("{e:#}"),
    }
}
