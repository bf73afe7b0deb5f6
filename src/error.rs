use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `rubberducky`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum DuckyError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generation backend ──────────────────────────────────────────────
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    // ── Snapshot store ──────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Turn state machine ──────────────────────────────────────────────
    #[error("turn: {0}")]
    Turn(#[from] TurnError),

    // ── REPL commands ───────────────────────────────────────────────────
    #[error("command: {0}")]
    Command(#[from] CommandError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Generation backend errors ──────────────────────────────────────────────

/// A failed call to the generation capability. The turn that triggered the
/// call is abandoned; no retry or backoff happens at this layer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Malformed(String),

    #[error("backend returned an empty reply")]
    EmptyReply,

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

// ─── Snapshot store errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed snapshot: {0}")]
    Parse(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Turn state machine errors ──────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("a turn is already awaiting a decision")]
    TurnInFlight,

    #[error("no turn is awaiting a decision")]
    NoPendingTurn,
}

// ─── REPL command errors ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown command: {0}")]
    Unknown(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, DuckyError>;
