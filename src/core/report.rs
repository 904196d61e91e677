use crate::core::error::ProxyError;
use crate::core::inject::Stage;

/// Terminal failure handler. Implementations never return: once the
/// bootstrap fails, the host process must not be left half-suspended and
/// uninjectable, so the only way forward is out.
pub trait FatalReporter {
    fn fatal(&self, stage: Stage, error: &ProxyError) -> !;
}

/// Blocks until the user acknowledges the failure with Numpad0, then
/// terminates the whole process. Keeping the prompt up stops the console
/// window from closing before the diagnostic can be read.
#[cfg(windows)]
pub struct PromptReporter;

#[cfg(windows)]
impl FatalReporter for PromptReporter {
    fn fatal(&self, stage: Stage, error: &ProxyError) -> ! {
        use windows::Win32::System::Threading::ExitProcess;
        use windows::Win32::UI::Input::KeyboardAndMouse::{GetAsyncKeyState, VK_NUMPAD0};

        use crate::core::console;

        tracing::error!("Bootstrap failed after stage '{stage}': {error}");
        eprintln!("{}{error}{}", console::RED, console::RESET);
        println!("Press Numpad0 to close...");

        loop {
            std::thread::sleep(std::time::Duration::from_millis(10));
            let pressed =
                unsafe { GetAsyncKeyState(VK_NUMPAD0.0 as i32) } as u16 & 0x8000 != 0;
            if pressed {
                break;
            }
        }

        // No distinct failure exit code; the original launcher contract
        // expects 0 on both paths.
        unsafe { ExitProcess(0) }
    }
}
