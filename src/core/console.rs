//! Diagnostic console for the injected proxy.
//!
//! The host is a windowed game with no stdout of its own, so the proxy
//! allocates a console lazily when injection is attempted and hides it again
//! for vanilla launches.

use windows::core::s;
use windows::Win32::System::Console::{
    AllocConsole, GetConsoleMode, GetConsoleWindow, GetStdHandle, SetConsoleCP,
    SetConsoleMode, SetConsoleOutputCP, SetConsoleTitleA, CONSOLE_MODE,
    ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
};
use windows::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_HIDE};

pub const RED: &str = "\x1b[1;31m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const RESET: &str = "\x1b[0m";

const CP_UTF8: u32 = 65001;

/// Allocate a console and switch it to ANSI + UTF-8 output.
pub fn init() {
    unsafe {
        if AllocConsole().is_err() {
            // Already attached to a console; keep using it.
            return;
        }

        if let Ok(handle) = GetStdHandle(STD_OUTPUT_HANDLE) {
            let mut mode = CONSOLE_MODE::default();
            if GetConsoleMode(handle, &mut mode).is_ok() {
                let _ = SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING);
            }
        }

        let _ = SetConsoleTitleA(s!("Beryl"));
        let _ = SetConsoleOutputCP(CP_UTF8);
        let _ = SetConsoleCP(CP_UTF8);
    }
}

/// Hide the console window without tearing it down. Used on the vanilla
/// path, which must leave no diagnostic surface behind.
pub fn hide() {
    unsafe {
        let window = GetConsoleWindow();
        if !window.is_invalid() {
            let _ = ShowWindow(window, SW_HIDE);
        }
    }
}
