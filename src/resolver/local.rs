//! Bundled slider document

use crate::{Error, Result, types::ConfigDocument};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the local configuration document
///
/// Absent files map to [`Error::MissingConfig`], read failures to
/// [`Error::UnreadableConfig`] and anything that is not a JSON object to
/// [`Error::InvalidConfig`].
pub async fn load_local(path: &Path) -> Result<ConfigDocument> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Local calculator config not found at {:?}", path);
            return Err(Error::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            warn!("Local calculator config at {:?} is not readable: {}", path, e);
            return Err(Error::UnreadableConfig {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let document =
        ConfigDocument::from_json(&content).map_err(|reason| Error::invalid_config(path, reason))?;

    debug!(
        "Loaded {} slider(s) from {:?}",
        document.sliders.len(),
        path
    );
    Ok(document)
}
