pub mod context;
#[cfg(windows)]
pub mod win32;

pub use context::{HostContext, RawThreadHandle, ThreadControl};
