pub mod model;
pub mod source;

pub use model::{LauncherConfig, VANILLA_PROFILE};
pub use source::load;
