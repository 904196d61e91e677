use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the proxy bootstrap.
/// Every module returns `Result<T, ProxyError>`.
///
/// There is no retry anywhere in this crate: each variant describes either a
/// permanent misconfiguration or an environment incompatibility, and is
/// routed straight to the terminal failure handler.
#[derive(Debug, Error)]
pub enum ProxyError {
    // ── Configuration ───────────────────────────────────
    #[error("could not open launcher config at {path:?}: {source}")]
    ConfigNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed launcher config at {path:?}: {source}")]
    MalformedConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Resolution ──────────────────────────────────────
    #[error("'{0}' is not a valid runtime name, no versioning found")]
    InvalidRuntimeName(String),

    #[error("runtime module not found at {modern:?} or legacy path {legacy:?}")]
    RuntimeNotFound { modern: PathBuf, legacy: PathBuf },

    // ── Host control ────────────────────────────────────
    #[error("could not capture the host thread: {0}")]
    HostCapture(String),

    #[error("thread-control primitive '{symbol}' is not exposed by {module}")]
    PrimitiveUnavailable {
        module: &'static str,
        symbol: &'static str,
    },

    // ── Injection ───────────────────────────────────────
    #[error("failed to load runtime module {path:?}: {source}")]
    LoadError {
        path: PathBuf,
        source: libloading::Error,
    },

    #[error("runtime module {path:?} does not export '{symbol}'")]
    MissingEntryPoint {
        path: PathBuf,
        symbol: &'static str,
    },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ProxyResult<T> = Result<T, ProxyError>;
