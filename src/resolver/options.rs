//! Persisted remote-URL setting
//!
//! The only value the service persists. [`FileOptionStore`] keeps it in a
//! small JSON file, [`MemoryOptionStore`] keeps it in process.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Option name of the remote configuration URL
pub const REMOTE_URL_OPTION: &str = "atera_compact_calculator_remote_url";

/// Storage for the remote-URL setting
#[async_trait::async_trait]
pub trait OptionStore: Send + Sync + std::fmt::Debug {
    /// Stored URL, `None` when never set
    async fn get_remote_url(&self) -> Result<Option<String>>;

    /// Replace the stored URL; an empty string clears it
    async fn set_remote_url(&self, value: &str) -> Result<()>;
}

/// Trim and check a submitted remote URL
///
/// Empty input is accepted and disables the remote layer. Anything else must
/// parse as an absolute `http` or `https` URL.
pub fn sanitize_remote_url(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let url = url::Url::parse(trimmed).map_err(|e| {
        Error::validation_with_value(
            "remote_url".to_string(),
            format!("not a valid URL: {}", e),
            trimmed.to_string(),
        )
    })?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::validation_with_value(
            "remote_url".to_string(),
            format!("unsupported scheme '{}'", other),
            trimmed.to_string(),
        )),
    }
}

/// JSON-file backed option store
#[derive(Debug)]
pub struct FileOptionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileOptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_options(&self) -> Result<Map<String, Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(Error::option_store(
                    "read".to_string(),
                    format!("{}: {}", self.path.display(), e),
                ));
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(options) => Ok(options),
            _ => Err(Error::option_store(
                "read".to_string(),
                format!("{} does not contain a JSON object", self.path.display()),
            )),
        }
    }
}

#[async_trait::async_trait]
impl OptionStore for FileOptionStore {
    async fn get_remote_url(&self) -> Result<Option<String>> {
        let options = self.read_options().await?;
        Ok(options
            .get(REMOTE_URL_OPTION)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn set_remote_url(&self, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut options = self.read_options().await?;
        options.insert(
            REMOTE_URL_OPTION.to_string(),
            Value::String(value.to_string()),
        );

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::option_store(
                    "write".to_string(),
                    format!("{}: {}", parent.display(), e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(options))?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            Error::option_store(
                "write".to_string(),
                format!("{}: {}", self.path.display(), e),
            )
        })?;

        info!("Stored {} in {:?}", REMOTE_URL_OPTION, self.path);
        Ok(())
    }
}

/// In-process option store
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    remote_url: RwLock<Option<String>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a URL
    pub fn with_remote_url(url: impl Into<String>) -> Self {
        Self {
            remote_url: RwLock::new(Some(url.into())),
        }
    }
}

#[async_trait::async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get_remote_url(&self) -> Result<Option<String>> {
        Ok(self.remote_url.read().await.clone())
    }

    async fn set_remote_url(&self, value: &str) -> Result<()> {
        debug!("Setting in-memory remote URL to '{}'", value);
        *self.remote_url.write().await = Some(value.to_string());
        Ok(())
    }
}
