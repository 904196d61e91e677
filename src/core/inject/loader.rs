use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::debug;

use crate::core::error::{ProxyError, ProxyResult};
use crate::core::host::{HostContext, RawThreadHandle};

/// Exported initialization function every runtime module must provide.
pub const RUNTIME_ENTRY_SYMBOL: &str = "Init";

// void Init(DWORD threadId, HANDLE threadHandle)
type RuntimeInitFn = unsafe extern "C" fn(u32, RawThreadHandle);

/// Loads a runtime module into the current process.
pub trait RuntimeLoader {
    fn load(&self, path: &Path) -> ProxyResult<Box<dyn RuntimeModule>>;
}

/// A runtime module resident in the host's address space.
pub trait RuntimeModule {
    /// Look up the well-known entry point and invoke it with the captured
    /// host thread identity. This is the handoff: after it returns, host
    /// thread management belongs to the runtime.
    fn invoke_entry(&self, host: &HostContext) -> ProxyResult<()>;
}

/// [`RuntimeLoader`] backed by the OS module loader.
pub struct DiskRuntimeLoader;

impl RuntimeLoader for DiskRuntimeLoader {
    fn load(&self, path: &Path) -> ProxyResult<Box<dyn RuntimeModule>> {
        let library = unsafe { Library::new(path) }.map_err(|source| ProxyError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded runtime module from {:?}", path);
        Ok(Box::new(LoadedRuntime {
            // Once loaded, the module stays resident; the OS loader owns it
            // from here and the proxy must never unload it.
            library: ManuallyDrop::new(library),
            path: path.to_path_buf(),
        }))
    }
}

struct LoadedRuntime {
    library: ManuallyDrop<Library>,
    path: PathBuf,
}

impl RuntimeModule for LoadedRuntime {
    fn invoke_entry(&self, host: &HostContext) -> ProxyResult<()> {
        let entry: Symbol<'_, RuntimeInitFn> = unsafe { self.library.get(b"Init\0") }
            .map_err(|_| ProxyError::MissingEntryPoint {
                path: self.path.clone(),
                symbol: RUNTIME_ENTRY_SYMBOL,
            })?;

        unsafe { entry(host.thread_id, host.thread_handle) };
        Ok(())
    }
}
