//! Editing session for the technique builder.
//!
//! `session` wires the pure rules engine to a host: it loads content, owns the
//! technique under edit and the saved tree, turns graph-surface intents into
//! tree mutations and runs exports asynchronously behind per-button guards.
pub mod config;
pub mod error;
pub mod export;
pub mod session;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use export::{
    ExportArtifact, ExportHandle, ExportKind, ExportSink, ExportStatus, ExportSurface, FileSink,
};
pub use session::Session;
