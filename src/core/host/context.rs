use crate::core::error::ProxyResult;

/// Raw OS thread handle, pointer-sized so it crosses the `Init` FFI boundary
/// unchanged. Stored as an integer to stay `Send` for the worker thread.
pub type RawThreadHandle = isize;

/// Identity of the host's main thread, captured exactly once while the
/// proxy's process-attach callback is still running on that thread — the id
/// becomes unobtainable once the thread moves on. Read-only afterwards; the
/// handle stays valid for the life of the host process.
#[derive(Debug, Clone, Copy)]
pub struct HostContext {
    pub thread_id: u32,
    pub thread_handle: RawThreadHandle,
}

/// Seam over the host-thread suspend primitive.
///
/// Suspension is one-way on purpose: the proxy never resumes the host, the
/// injected runtime does once its own initialization is finished.
pub trait ThreadControl {
    fn suspend(&self, host: &HostContext) -> ProxyResult<()>;
}
