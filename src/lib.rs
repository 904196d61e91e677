pub mod core;

pub use crate::core::error::{ProxyError, ProxyResult};

#[cfg(windows)]
mod attach {
    use std::ffi::c_void;

    use windows::Win32::Foundation::{BOOL, HINSTANCE};
    use windows::Win32::System::SystemServices::DLL_PROCESS_ATTACH;

    use crate::core::host::win32;

    /// Entrypoint called when the host process implicitly loads the proxy.
    ///
    /// The host thread's identity has to be captured here, synchronously,
    /// while that thread is still the one running the attach callback. All
    /// blocking work (file reads, module load) then happens on a separate
    /// worker thread so the host's startup is not stalled under the loader
    /// lock.
    #[no_mangle]
    #[allow(non_snake_case)]
    extern "system" fn DllMain(
        _module: HINSTANCE,
        call_reason: u32,
        _reserved: *mut c_void,
    ) -> BOOL {
        if call_reason == DLL_PROCESS_ATTACH {
            if let Ok(host) = win32::capture_host() {
                std::thread::spawn(move || super::proxy_worker(host));
            }
        }

        BOOL::from(true)
    }
}

#[cfg(windows)]
fn proxy_worker(host: core::host::HostContext) {
    use crate::core::host::win32::NtThreadControl;
    use crate::core::inject::{DiskRuntimeLoader, InjectionCoordinator, Outcome, Stage};
    use crate::core::report::{FatalReporter, PromptReporter};
    use crate::core::{console, paths};

    console::init();
    init_tracing();

    tracing::info!(
        "Beryl proxy {} attached, host thread id {}, handle {:#x}",
        env!("CARGO_PKG_VERSION"),
        host.thread_id,
        host.thread_handle
    );

    let reporter = PromptReporter;

    let paths = match paths::proxy_paths() {
        Ok(paths) => paths,
        Err(error) => reporter.fatal(Stage::Start, &error),
    };

    let thread_control = NtThreadControl;
    let loader = DiskRuntimeLoader;
    let mut coordinator = InjectionCoordinator::new(
        &host,
        &thread_control,
        &loader,
        paths.config_path().to_path_buf(),
        paths.root_dir().to_path_buf(),
    );

    match coordinator.run() {
        Ok(Outcome::Vanilla) => console::hide(),
        Ok(Outcome::Handoff(resolved)) => {
            tracing::info!("Handoff complete, runtime loaded from {:?}", resolved.path);
        }
        Err(error) => reporter.fatal(coordinator.stage(), &error),
    }
}

#[cfg(windows)]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,beryl_proxy=debug")),
        )
        .try_init();
}
