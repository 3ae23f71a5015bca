pub mod app;
pub mod gui;
pub mod history;
pub mod logging;
pub mod settings;
pub mod uploader;
