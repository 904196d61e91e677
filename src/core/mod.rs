// ─── Beryl Proxy Core ───
// One-shot bootstrap that hands the Bedrock client over to a mod runtime.
//
// Architecture:
//   core/
//     config/   — launcher_config.json model + loader
//     resolver/ — runtime name parsing + modern/legacy path probing
//     host/     — host-thread capture + suspend primitive
//     inject/   — coordinator state machine + module loader seam
//     console   — diagnostic console surface (windows only)
//     report    — terminal failure handler
//     paths     — well-known filesystem locations

pub mod config;
#[cfg(windows)]
pub mod console;
pub mod error;
pub mod host;
pub mod inject;
pub mod paths;
pub mod report;
pub mod resolver;
