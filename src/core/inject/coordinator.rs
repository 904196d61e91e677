use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use super::loader::RuntimeLoader;
use crate::core::config;
use crate::core::error::ProxyResult;
use crate::core::host::{HostContext, ThreadControl};
use crate::core::resolver::{self, ResolvedPath, Resolution};

/// Last completed step of the bootstrap sequence. Only used for diagnostics:
/// when a step fails, the failure handler reports how far the proxy got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ConfigLoaded,
    Resolved,
    Suspended,
    Injected,
    EntryPointInvoked,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::ConfigLoaded => "config-loaded",
            Stage::Resolved => "resolved",
            Stage::Suspended => "suspended",
            Stage::Injected => "injected",
            Stage::EntryPointInvoked => "entry-point-invoked",
        };
        write!(f, "{name}")
    }
}

/// Terminal success states of the bootstrap.
#[derive(Debug)]
pub enum Outcome {
    /// Vanilla profile: no injection happened, no console should stay up.
    Vanilla,
    /// Control was handed to the runtime loaded from this path.
    Handoff(ResolvedPath),
}

/// Drives config load → resolution → suspension → module load → handoff,
/// strictly in that order, on the proxy's single worker thread.
///
/// The ordering around suspension is the load-bearing invariant: the host
/// thread is frozen only after resolution produced a module that exists on
/// disk, and before that module is loaded, so the host cannot race the
/// runtime's initialization and is never left suspended for a module that
/// was never going to load.
pub struct InjectionCoordinator<'a, T: ThreadControl, L: RuntimeLoader> {
    host: &'a HostContext,
    thread_control: &'a T,
    loader: &'a L,
    config_path: PathBuf,
    root_dir: PathBuf,
    stage: Stage,
}

impl<'a, T: ThreadControl, L: RuntimeLoader> InjectionCoordinator<'a, T, L> {
    pub fn new(
        host: &'a HostContext,
        thread_control: &'a T,
        loader: &'a L,
        config_path: PathBuf,
        root_dir: PathBuf,
    ) -> Self {
        Self {
            host,
            thread_control,
            loader,
            config_path,
            root_dir,
            stage: Stage::Start,
        }
    }

    /// Last completed stage, for failure diagnostics.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        debug!("Bootstrap stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Run the bootstrap to one of its terminal states. Any error is
    /// terminal for the whole process: the caller routes it to the fatal
    /// reporter, there is no retry.
    pub fn run(&mut self) -> ProxyResult<Outcome> {
        let config = config::load(&self.config_path)?;
        self.advance(Stage::ConfigLoaded);

        let resolved = match resolver::resolve(&config, &self.root_dir)? {
            Resolution::Vanilla => {
                self.advance(Stage::Resolved);
                return Ok(Outcome::Vanilla);
            }
            Resolution::Module(resolved) => resolved,
        };
        self.advance(Stage::Resolved);

        info!(
            "Using runtime '{}' ({:?} layout), host thread id {}",
            config.runtime, resolved.layout, self.host.thread_id
        );

        // Freeze the host so the runtime can take control of it during Init.
        self.thread_control.suspend(self.host)?;
        self.advance(Stage::Suspended);

        let module = self.loader.load(&resolved.path)?;
        self.advance(Stage::Injected);

        info!("Injecting runtime '{}'", config.runtime);
        module.invoke_entry(self.host)?;
        self.advance(Stage::EntryPointInvoked);

        Ok(Outcome::Handoff(resolved))
    }
}
