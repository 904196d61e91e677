pub mod coordinator;
pub mod loader;

pub use coordinator::{InjectionCoordinator, Outcome, Stage};
pub use loader::{DiskRuntimeLoader, RuntimeLoader, RuntimeModule, RUNTIME_ENTRY_SYMBOL};
