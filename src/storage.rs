//! Reading and writing the persisted ledger document.
//!
//! A missing file is a first run, not an error. Writes go to a sibling
//! `.tmp` file that is then renamed over the target.

use crate::errors::AppError;
use crate::models::{LedgerData, StoredDocument};
use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum ReadError {
    /// The file exists but is not a JSON object of the expected shape.
    Unreadable(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(err) => write!(f, "persisted document is unreadable: {err}"),
            Self::Io(err) => write!(f, "failed to read persisted document: {err}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

/// Returns `Ok(None)` when nothing has been persisted yet.
pub async fn read_document(path: &Path) -> Result<Option<StoredDocument>, ReadError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ReadError::Io(err)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(ReadError::Unreadable)
}

pub async fn write_document(path: &Path, data: &LedgerData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            warn!(tmp = %tmp.display(), "failed to remove temp file: {cleanup}");
        }
        return Err(err.into());
    }
    debug!(path = %path.display(), "ledger document written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".tmp");
    path.with_file_name(name)
}
