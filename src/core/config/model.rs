use serde::Deserialize;

/// Sentinel profile meaning "perform no injection".
pub const VANILLA_PROFILE: &str = "Vanilla";

/// Launcher config written by the launcher, read exactly once per process
/// launch. Never persisted back to disk by the proxy.
///
/// The only field the proxy cares about is `runtime`: either the vanilla
/// sentinel or a versioned `<name>@<version>` identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct LauncherConfig {
    pub runtime: String,
}

impl LauncherConfig {
    pub fn is_vanilla(&self) -> bool {
        self.runtime == VANILLA_PROFILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_sentinel_is_case_sensitive() {
        let config = LauncherConfig {
            runtime: "Vanilla".into(),
        };
        assert!(config.is_vanilla());

        let config = LauncherConfig {
            runtime: "vanilla".into(),
        };
        assert!(!config.is_vanilla());
    }
}
