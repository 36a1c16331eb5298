//! Guarded asynchronous exports.
//!
//! Each export button is backed by an [`ExportSurface`]. Starting an export
//! moves the surface from `Idle` to `Running` and delivers the artifact to an
//! [`ExportSink`] on a tokio task. The outcome is published as `Succeeded` or
//! `Failed`, and after the configured delay the surface returns to `Idle`.
//! A surface that is not idle refuses to start another export.
//!
//! Status changes are published on a `watch` channel so hosts can swap button
//! labels without polling.

mod sink;

pub use sink::{ExportArtifact, ExportSink, FileSink};

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};

use crate::error::{Result, SessionError};

/// Which export button a surface belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ExportKind {
    Text,
    Image,
    Manual,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExportStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl ExportStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ExportStatus::Idle)
    }
}

/// Status and concurrency guard of one export button.
#[derive(Debug)]
pub struct ExportSurface {
    kind: ExportKind,
    reset_delay: Duration,
    status: Arc<watch::Sender<ExportStatus>>,
}

impl ExportSurface {
    pub fn new(kind: ExportKind, reset_delay: Duration) -> Self {
        let (status, _) = watch::channel(ExportStatus::Idle);
        Self {
            kind,
            reset_delay,
            status: Arc::new(status),
        }
    }

    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    pub fn status(&self) -> ExportStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportStatus> {
        self.status.subscribe()
    }

    /// Delivers `artifact` to `sink` in the background.
    ///
    /// Fails with [`SessionError::ExportInProgress`] unless the surface is
    /// idle, and with [`SessionError::NoRuntime`] outside a tokio runtime.
    pub fn start(
        &self,
        sink: Arc<dyn ExportSink>,
        artifact: ExportArtifact,
    ) -> Result<ExportHandle> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let claimed = self.status.send_if_modified(|status| {
            if status.is_idle() {
                *status = ExportStatus::Running;
                true
            } else {
                false
            }
        });
        if !claimed {
            tracing::warn!(kind = %self.kind, "export ignored: surface busy");
            return Err(SessionError::ExportInProgress(self.kind));
        }

        let kind = self.kind;
        let delay = self.reset_delay;
        let status = Arc::clone(&self.status);
        let (result_tx, result_rx) = oneshot::channel();

        tracing::debug!(%kind, file = artifact.file_name(), "export started");
        runtime.spawn(async move {
            let outcome = sink.deliver(artifact).await;
            match &outcome {
                Ok(()) => {
                    tracing::info!(%kind, "export succeeded");
                    status.send_replace(ExportStatus::Succeeded);
                }
                Err(error) => {
                    tracing::warn!(%kind, %error, "export failed");
                    status.send_replace(ExportStatus::Failed);
                }
            }
            // The caller may have dropped the handle.
            let _ = result_tx.send(outcome);

            tokio::time::sleep(delay).await;
            status.send_replace(ExportStatus::Idle);
            tracing::debug!(%kind, "export surface reset");
        });

        Ok(ExportHandle {
            kind,
            result: result_rx,
        })
    }
}

/// Completion of one export. Dropping it does not cancel the export.
#[derive(Debug)]
pub struct ExportHandle {
    kind: ExportKind,
    result: oneshot::Receiver<Result<()>>,
}

impl ExportHandle {
    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    /// Waits for the sink's result.
    pub async fn wait(self) -> Result<()> {
        self.result
            .await
            .map_err(|_| SessionError::ExportAborted(self.kind))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(ExportKind::Manual.to_string(), "manual");
        assert_eq!(ExportStatus::Succeeded.as_ref(), "succeeded");
        assert!(ExportStatus::default().is_idle());
    }

    #[test]
    fn start_outside_runtime_is_rejected() {
        let surface = ExportSurface::new(ExportKind::Text, Duration::from_millis(1));
        let sink: Arc<dyn ExportSink> = Arc::new(FileSink::new(std::env::temp_dir()));
        let artifact = ExportArtifact::Text {
            file_name: "t.txt".into(),
            content: String::new(),
        };
        assert!(matches!(
            surface.start(sink, artifact),
            Err(SessionError::NoRuntime)
        ));
        assert!(surface.status().is_idle());
    }
}
