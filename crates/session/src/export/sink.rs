//! Destinations for exported artifacts.
//!
//! Clipboards, image renderers and download prompts live in the host; they
//! plug in by implementing [`ExportSink`].
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use technique_core::{BudgetReport, Technique};

use super::ExportKind;
use crate::error::{Result, SessionError};

/// Payload handed to a sink.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportArtifact {
    /// Plain-text summary (clipboard).
    Text { file_name: String, content: String },
    /// Markdown reference manual (download).
    Manual { file_name: String, content: String },
    /// Technique panel to be rasterized by an external renderer.
    Image {
        file_name: String,
        technique: Box<Technique>,
        report: BudgetReport,
    },
}

impl ExportArtifact {
    pub fn kind(&self) -> ExportKind {
        match self {
            Self::Text { .. } => ExportKind::Text,
            Self::Manual { .. } => ExportKind::Manual,
            Self::Image { .. } => ExportKind::Image,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Text { file_name, .. }
            | Self::Manual { file_name, .. }
            | Self::Image { file_name, .. } => file_name,
        }
    }

    /// Textual body, if the artifact has one.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } | Self::Manual { content, .. } => Some(content),
            Self::Image { .. } => None,
        }
    }
}

/// Trait for delivering export artifacts.
///
/// Different implementations can handle:
/// - Clipboard writes
/// - Image rendering of the technique panel
/// - File downloads
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn deliver(&self, artifact: ExportArtifact) -> Result<()>;
}

/// Writes textual artifacts into a directory. Images need a renderer and are
/// refused.
#[derive(Clone, Debug)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ExportSink for FileSink {
    async fn deliver(&self, artifact: ExportArtifact) -> Result<()> {
        let Some(content) = artifact.content() else {
            return Err(SessionError::UnsupportedArtifact(artifact.kind()));
        };

        let file_name = artifact.file_name();
        let mut components = Path::new(file_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(SessionError::InvalidFileName(file_name.to_owned()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), "artifact written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_sink_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("out"));
        sink.deliver(ExportArtifact::Manual {
            file_name: "manual.md".into(),
            content: "# Manual".into(),
        })
        .await
        .unwrap();

        let written = std::fs::read_to_string(dir.path().join("out/manual.md")).unwrap();
        assert_eq!(written, "# Manual");
    }

    #[tokio::test]
    async fn file_sink_refuses_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("out"));
        for file_name in ["../escape.txt", "nested/manual.md", "/abs.md", "..", ""] {
            let err = sink
                .deliver(ExportArtifact::Text {
                    file_name: file_name.into(),
                    content: "x".into(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, SessionError::InvalidFileName(_)), "{file_name}");
        }
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn file_sink_refuses_images() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        let err = sink
            .deliver(ExportArtifact::Image {
                file_name: "tecnica.png".into(),
                technique: Box::default(),
                report: BudgetReport::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedArtifact(ExportKind::Image)));
    }
}
