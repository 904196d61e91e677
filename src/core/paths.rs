use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::error::{ProxyError, ProxyResult};

/// Directory under `com.mojang` that holds the proxy's config and mods.
const BRAND_DIR_NAME: &str = "beryl";

const CONFIG_FILE_NAME: &str = "launcher_config.json";

/// UWP package identity of the Bedrock client; its LocalState folder is
/// where `games/com.mojang` lives.
const MINECRAFT_PACKAGE: &str = "Microsoft.MinecraftUWP_8wekyb3d8bbwe";

#[derive(Debug, Clone)]
pub struct ProxyPaths {
    root_dir: PathBuf,
    config_path: PathBuf,
}

impl ProxyPaths {
    /// Folder probed for `mods/<name>@<version>/...`.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

static PROXY_PATHS: OnceLock<ProxyPaths> = OnceLock::new();

/// Well-known locations inside the game's data directory, computed once.
/// Nothing is created on disk: a missing tree is a resolution failure later,
/// not something the proxy repairs.
pub fn proxy_paths() -> ProxyResult<&'static ProxyPaths> {
    if let Some(paths) = PROXY_PATHS.get() {
        return Ok(paths);
    }

    let local_data = dirs::data_local_dir()
        .ok_or_else(|| ProxyError::Other("no local data directory on this system".into()))?;

    let com_mojang = local_data
        .join("Packages")
        .join(MINECRAFT_PACKAGE)
        .join("LocalState")
        .join("games")
        .join("com.mojang");

    let root_dir = com_mojang.join(BRAND_DIR_NAME);
    let config_path = root_dir.join(CONFIG_FILE_NAME);

    let _ = PROXY_PATHS.set(ProxyPaths {
        root_dir,
        config_path,
    });
    Ok(PROXY_PATHS.get().expect("proxy paths set"))
}
