use std::path::PathBuf;

/// Catbox API endpoint for file uploads.
pub const API_URL_CATBOX: &str = "https://catbox.moe/user/api.php";

/// File storing past uploads, relative to the working directory.
pub const HISTORY_FILE: &str = "upload_history.json";

/// Compiled-in configuration of the uploader.
///
/// There is no settings file; every value comes from [`Settings::default`].
#[derive(Debug, Clone)]
pub struct Settings {
    /// Endpoint receiving the multipart upload.
    pub api_url: String,
    /// Form field carrying the file payload.
    pub file_field: String,
    /// Value of the `reqtype` form field.
    pub req_type: String,
    /// Optional account hash. Empty uploads anonymously.
    pub userhash: String,
    pub history_file: PathBuf,
    /// When enabled the logger is initialised at debug level.
    pub debug_logging: bool,
    /// Fixed size of the main window.
    pub window_size: (f32, f32),
    /// Fixed position of the main window.
    pub window_pos: (f32, f32),
    /// Duration of toast notifications in seconds.
    pub toast_duration: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: API_URL_CATBOX.into(),
            file_field: "fileToUpload".into(),
            req_type: "fileupload".into(),
            userhash: String::new(),
            history_file: PathBuf::from(HISTORY_FILE),
            debug_logging: true,
            window_size: (600.0, 400.0),
            window_pos: (200.0, 200.0),
            toast_duration: 3.0,
        }
    }
}
