use std::path::Path;

use tracing::debug;

use super::model::LauncherConfig;
use crate::core::error::{ProxyError, ProxyResult};

/// Read and deserialize the launcher config.
///
/// Fails with [`ProxyError::ConfigNotFound`] when the file cannot be opened
/// and [`ProxyError::MalformedConfig`] when the document does not parse or
/// the `runtime` key is absent. There is no partial result: the caller gets
/// a full config or a definitive failure.
pub fn load(path: &Path) -> ProxyResult<LauncherConfig> {
    let json = std::fs::read_to_string(path).map_err(|source| ProxyError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let config: LauncherConfig =
        serde_json::from_str(&json).map_err(|source| ProxyError::MalformedConfig {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded launcher config, runtime = '{}'", config.runtime);
    Ok(config)
}
