use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One past upload: the hosted URL and the note the user attached to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub url: String,
    pub note: String,
}

/// JSON-backed list of past uploads.
///
/// Every operation reloads or rewrites the whole file. There is no locking,
/// so two running instances can lose each other's records.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records in file order. A missing or blank file is an empty
    /// history; a file that does not parse is an error.
    pub fn load(&self) -> anyhow::Result<Vec<UploadRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: Vec<UploadRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(list)
    }

    /// Overwrite the file with `records`, indented by four spaces.
    pub fn save(&self, records: &[UploadRecord]) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut ser)?;
        std::fs::write(&self.path, buf)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Append one record and persist the full list.
    pub fn append(&self, url: &str, note: &str) -> anyhow::Result<()> {
        let mut list = self.load()?;
        list.push(UploadRecord {
            url: url.to_string(),
            note: note.to_string(),
        });
        self.save(&list)?;
        tracing::debug!(count = list.len(), path = %self.path.display(), "history saved");
        Ok(())
    }
}

/// Render records as the text shown in the history viewer.
pub fn render_history(records: &[UploadRecord]) -> String {
    records
        .iter()
        .map(|r| format!("URL: {}\nNote: {}\n\n", r.url, r.note))
        .collect()
}
