//! Unified error type surfaced by the session.
//!
//! Wraps rule rejections from `technique-core`, content loading failures and
//! export failures so hosts can surface them with consistent context.

use thiserror::Error;

use technique_core::{AddEffectError, DraftError, ExportError, TreeError, WorkbenchError};

use crate::export::ExportKind;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a power level must be chosen first")]
    LevelNotSelected,

    #[error("no effect '{0}' in the catalog")]
    UnknownEffect(String),

    #[error(transparent)]
    AddEffect(#[from] AddEffectError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Workbench(#[from] WorkbenchError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0} export already in progress")]
    ExportInProgress(ExportKind),

    #[error("{0} export task ended without reporting a result")]
    ExportAborted(ExportKind),

    #[error("exports need a running tokio runtime")]
    NoRuntime,

    #[error("sink cannot deliver {0} artifacts")]
    UnsupportedArtifact(ExportKind),

    #[error("'{0}' is not a plain file name")]
    InvalidFileName(String),

    #[error("export I/O failed")]
    Io(#[from] std::io::Error),

    #[error("failed to load content")]
    Content(#[source] anyhow::Error),
}
