use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create window {0}")]
    WindowCreation(String),
    #[error("No display available")]
    DisplayUnavailable,
    #[error("Display query failed: {0}")]
    DisplayQuery(String),
    #[error("Capture enumeration failed: {0}")]
    CaptureEnumeration(String),
    #[error("Chat backend error: {0}")]
    ChatBackend(String),
    #[error("State lock poisoned")]
    StatePoisoned,
    #[error("Tauri error: {0}")]
    TauriError(#[from] tauri::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}
