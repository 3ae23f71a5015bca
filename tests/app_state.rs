use catbox_uploader::app::{AppState, Phase, RESULT_LABEL};
use catbox_uploader::history::{HistoryStore, UploadRecord};
use catbox_uploader::uploader::{Upload, UploadError};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

enum Outcome {
    Url(&'static str),
    Status(u16, &'static str),
    Unreadable,
}

struct StubUploader {
    outcome: Outcome,
    seen: RefCell<Vec<PathBuf>>,
}

impl StubUploader {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Upload for StubUploader {
    fn upload(&self, path: &Path) -> Result<String, UploadError> {
        self.seen.borrow_mut().push(path.to_path_buf());
        match self.outcome {
            Outcome::Url(url) => Ok(url.to_string()),
            Outcome::Status(status, body) => Err(UploadError::Failed {
                status,
                body: body.to_string(),
            }),
            Outcome::Unreadable => Err(UploadError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            ))),
        }
    }
}

fn state() -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("upload_history.json"));
    (dir, AppState::new(store))
}

fn upload_with(state: &mut AppState, uploader: &StubUploader) {
    state.request_upload();
    assert_eq!(state.phase, Phase::FilePicking);
    state.file_picked(Some(PathBuf::from("/tmp/cat.png")));
    assert_eq!(state.phase, Phase::Uploading(PathBuf::from("/tmp/cat.png")));
    state.perform_upload(uploader);
}

#[test]
fn dismissed_picker_returns_to_idle() {
    let (_dir, mut state) = state();
    assert_eq!(state.result_label(), RESULT_LABEL);
    state.request_upload();
    state.file_picked(None);
    assert!(state.is_idle());
    assert!(!state.store().path().exists());
}

#[test]
fn successful_upload_prompts_for_note_and_records_it() {
    let (_dir, mut state) = state();
    let uploader = StubUploader::new(Outcome::Url("https://files.catbox.moe/abc123.png"));
    upload_with(&mut state, &uploader);

    assert_eq!(uploader.seen.borrow().as_slice(), [PathBuf::from("/tmp/cat.png")]);
    assert_eq!(state.url_field, "https://files.catbox.moe/abc123.png");
    assert_eq!(state.result_label(), RESULT_LABEL);
    assert_eq!(
        state.phase,
        Phase::NotePrompt {
            url: "https://files.catbox.moe/abc123.png".into()
        }
    );

    assert!(state.submit_note(Some("holiday".into())));
    assert!(state.is_idle());
    assert_eq!(
        state.store().load().unwrap(),
        vec![UploadRecord {
            url: "https://files.catbox.moe/abc123.png".into(),
            note: "holiday".into(),
        }]
    );
}

#[test]
fn cancelled_note_is_saved_empty() {
    let (_dir, mut state) = state();
    let uploader = StubUploader::new(Outcome::Url("https://files.catbox.moe/x.txt"));
    upload_with(&mut state, &uploader);

    assert!(state.submit_note(None));
    let records = state.store().load().unwrap();
    assert_eq!(records.last().map(|r| r.note.as_str()), Some(""));
}

#[test]
fn rejected_upload_shows_status_and_body() {
    let (_dir, mut state) = state();
    let uploader = StubUploader::new(Outcome::Status(403, "banned"));
    upload_with(&mut state, &uploader);

    assert_eq!(
        state.phase,
        Phase::Error {
            title: "Upload Failed".into(),
            message: "Error: 403: banned".into(),
        }
    );
    assert!(state.url_field.is_empty());

    state.dismiss_error();
    assert!(state.is_idle());
    assert!(state.store().load().unwrap().is_empty());
}

#[test]
fn unexpected_error_is_reported_generically() {
    let (_dir, mut state) = state();
    let uploader = StubUploader::new(Outcome::Unreadable);
    upload_with(&mut state, &uploader);

    match &state.phase {
        Phase::Error { title, message } => {
            assert_eq!(title, "Error");
            assert!(message.starts_with("An error occurred: "));
            assert!(message.contains("denied"));
        }
        other => panic!("unexpected phase: {other:?}"),
    }
}

#[test]
fn corrupt_history_fails_note_without_overwriting() {
    let (_dir, mut state) = state();
    std::fs::write(state.store().path(), "garbage").unwrap();
    let uploader = StubUploader::new(Outcome::Url("https://files.catbox.moe/x.txt"));
    upload_with(&mut state, &uploader);

    assert!(!state.submit_note(Some("lost".into())));
    assert!(matches!(&state.phase, Phase::Error { title, .. } if title == "History Error"));
    assert_eq!(std::fs::read_to_string(state.store().path()).unwrap(), "garbage");
    // The URL is still available for copying.
    assert_eq!(state.url_field, "https://files.catbox.moe/x.txt");
}

#[test]
fn view_history_renders_records_fresh_each_time() {
    let (_dir, mut state) = state();
    state.view_history();
    assert_eq!(state.history_view.as_ref().map(|v| v.text.as_str()), Some(""));

    state.store().append("u1", "n1").unwrap();
    state.view_history();
    let view = state.history_view.as_ref().unwrap();
    assert_eq!(view.text, "URL: u1\nNote: n1\n\n");
    assert_eq!(view.records.len(), 1);

    state.close_history();
    assert!(state.history_view.is_none());
}

#[test]
fn view_history_reports_corrupt_file() {
    let (_dir, mut state) = state();
    std::fs::write(state.store().path(), "[{").unwrap();
    state.view_history();
    assert!(state.history_view.is_none());
    assert!(matches!(&state.phase, Phase::Error { title, .. } if title == "History Error"));
}

#[test]
fn upload_ignored_while_busy() {
    let (_dir, mut state) = state();
    let uploader = StubUploader::new(Outcome::Status(500, "down"));
    upload_with(&mut state, &uploader);

    state.request_upload();
    assert!(matches!(state.phase, Phase::Error { .. }));
    state.view_history();
    assert!(state.history_view.is_none());
}

#[test]
fn quit_is_requested_immediately() {
    let (_dir, mut state) = state();
    assert!(!state.quit_requested());
    state.quit();
    assert!(state.quit_requested());
}
