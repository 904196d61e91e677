use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::descriptor::RuntimeDescriptor;
use crate::core::config::LauncherConfig;
use crate::core::error::{ProxyError, ProxyResult};

/// On-disk packaging convention a runtime module was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `mods/<name>@<version>/win-client/<name>.dll` — preferred.
    Modern,
    /// `mods/<name>@<version>/<name>.dll` — still accepted, deprecated.
    Legacy,
}

/// A concrete module path plus the layout it was found under. Produced by
/// [`resolve`], consumed once by the coordinator, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub layout: Layout,
}

/// Outcome of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Vanilla profile: valid terminal state, skip injection entirely.
    Vanilla,
    /// A runtime module exists on disk at this path.
    Module(ResolvedPath),
}

/// Turn the configured runtime into a concrete module path.
///
/// Probe order is strict: the modern `win-client` layout wins, the legacy
/// flat layout is a fallback that emits a deprecation warning, and a miss on
/// both fails with [`ProxyError::RuntimeNotFound`] carrying both probed
/// paths. Reads the filesystem but mutates nothing: identical config and
/// disk state always yield the identical result.
pub fn resolve(config: &LauncherConfig, root_dir: &Path) -> ProxyResult<Resolution> {
    if config.is_vanilla() {
        debug!("Vanilla profile selected, skipping injection");
        return Ok(Resolution::Vanilla);
    }

    let descriptor = RuntimeDescriptor::parse(&config.runtime)?;
    let mod_dir = root_dir.join("mods").join(&descriptor.fully_qualified);

    let modern = mod_dir.join("win-client").join(descriptor.module_filename());
    if modern.exists() {
        debug!("Resolved runtime '{}' at {:?}", descriptor, modern);
        return Ok(Resolution::Module(ResolvedPath {
            path: modern,
            layout: Layout::Modern,
        }));
    }

    let legacy = mod_dir.join(descriptor.module_filename());
    if legacy.exists() {
        warn!(
            "Runtime '{}' uses legacy file paths! New mods should use 'mod/win-client/*.dll' over 'mod/*.dll'",
            descriptor
        );
        return Ok(Resolution::Module(ResolvedPath {
            path: legacy,
            layout: Layout::Legacy,
        }));
    }

    Err(ProxyError::RuntimeNotFound { modern, legacy })
}
