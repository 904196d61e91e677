pub mod descriptor;
pub mod resolve;

pub use descriptor::RuntimeDescriptor;
pub use resolve::{resolve, Layout, ResolvedPath, Resolution};
