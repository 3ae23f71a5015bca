use crate::settings::Settings;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The host answered with something other than `200 OK`.
    #[error("Error: {status}: {body}")]
    Failed { status: u16, body: String },
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can host a local file and hand back its public URL.
pub trait Upload {
    fn upload(&self, path: &Path) -> Result<String, UploadError>;
}

/// Map a raw response to the hosted URL. Only status 200 counts as success.
pub fn interpret_response(status: u16, body: &str) -> Result<String, UploadError> {
    if status == 200 {
        Ok(body.trim().to_string())
    } else {
        Err(UploadError::Failed {
            status,
            body: body.to_string(),
        })
    }
}

/// Uploads files to catbox.moe with permanent storage.
pub struct CatboxUploader {
    client: Client,
    api_url: String,
    file_field: String,
    req_type: String,
    userhash: String,
}

impl CatboxUploader {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("catbox-uploader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: &Settings, client: Client) -> Self {
        Self {
            client,
            api_url: settings.api_url.clone(),
            file_field: settings.file_field.clone(),
            req_type: settings.req_type.clone(),
            userhash: settings.userhash.clone(),
        }
    }
}

impl Upload for CatboxUploader {
    fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".into());

        tracing::debug!(path = %path.display(), "uploading file without expiration");
        tracing::debug!(reqtype = %self.req_type, userhash = %self.userhash, "params");

        let form = Form::new()
            .text("reqtype", self.req_type.clone())
            .text("userhash", self.userhash.clone())
            .part(self.file_field.clone(), Part::bytes(bytes).file_name(file_name));

        let resp = self.client.post(&self.api_url).multipart(form).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;

        tracing::debug!(status, "response status code");
        tracing::debug!(body = %body, "response text");

        interpret_response(status, &body)
    }
}
