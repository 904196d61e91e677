use tracing::debug;
use windows::core::s;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::LibraryLoader::{GetModuleHandleA, GetProcAddress};
use windows::Win32::System::Threading::{GetCurrentThreadId, OpenThread, THREAD_ALL_ACCESS};

use super::context::{HostContext, ThreadControl};
use crate::core::error::{ProxyError, ProxyResult};

const NTDLL: &str = "ntdll.dll";
const SUSPEND_SYMBOL: &str = "NtSuspendThread";

// NtSuspendThread is internal to ntdll and not declared in any import
// library, so it has to be late-bound by name at runtime.
type NtSuspendThreadFn = unsafe extern "system" fn(HANDLE, *mut u32) -> i32;

/// Capture the identity of the thread currently executing.
///
/// Must be called synchronously from the process-attach callback, before the
/// host's main thread runs anything else.
pub fn capture_host() -> ProxyResult<HostContext> {
    let thread_id = unsafe { GetCurrentThreadId() };
    let handle = unsafe { OpenThread(THREAD_ALL_ACCESS, false, thread_id) }
        .map_err(|e| ProxyError::HostCapture(e.to_string()))?;

    Ok(HostContext {
        thread_id,
        thread_handle: handle.0 as isize,
    })
}

/// [`ThreadControl`] backed by ntdll's `NtSuspendThread`.
pub struct NtThreadControl;

impl NtThreadControl {
    fn bind_suspend(&self) -> ProxyResult<NtSuspendThreadFn> {
        let unavailable = || ProxyError::PrimitiveUnavailable {
            module: NTDLL,
            symbol: SUSPEND_SYMBOL,
        };

        let ntdll = unsafe { GetModuleHandleA(s!("ntdll.dll")) }.map_err(|_| unavailable())?;
        let address = unsafe { GetProcAddress(ntdll, s!("NtSuspendThread")) }.ok_or_else(unavailable)?;

        // FARPROC loses the signature; restore it.
        Ok(unsafe { std::mem::transmute::<_, NtSuspendThreadFn>(address) })
    }
}

impl ThreadControl for NtThreadControl {
    fn suspend(&self, host: &HostContext) -> ProxyResult<()> {
        let nt_suspend_thread = self.bind_suspend()?;

        let mut previous_count: u32 = 0;
        let status = unsafe {
            nt_suspend_thread(HANDLE(host.thread_handle as *mut _), &mut previous_count)
        };

        debug!(
            "Suspended host thread {} (NTSTATUS {:#010x}, previous suspend count {})",
            host.thread_id, status, previous_count
        );
        Ok(())
    }
}
