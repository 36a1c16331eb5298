//! Host-side orchestration of one editing session.
//!
//! A [`Session`] owns the workbench (technique under edit), the tree of saved
//! techniques and the three export surfaces. Hosts call into it in response to
//! user events; every call is synchronous except the exports, which run on
//! tokio and report through [`ExportHandle`]s.

use std::sync::Arc;

use technique_content::{ContentFactory, builtin_catalog, builtin_rules};
use technique_core::{
    Catalog, Edge, EffectDraft, Force, InstanceId, Layout, MANUAL_FILE_NAME, PowerLevel,
    RulesConfig, Technique, TechniqueId, TechniqueTree, TreeError, TreeIntent, Workbench,
    file_stem, image_file_name, markdown_manual, text_summary,
};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::export::{ExportArtifact, ExportHandle, ExportKind, ExportSink, ExportStatus, ExportSurface};

pub struct Session {
    config: SessionConfig,
    workbench: Workbench,
    tree: TechniqueTree,
    sink: Arc<dyn ExportSink>,
    text_export: ExportSurface,
    image_export: ExportSurface,
    manual_export: ExportSurface,
}

impl Session {
    pub fn new(
        catalog: Arc<Catalog>,
        rules: RulesConfig,
        config: SessionConfig,
        sink: Arc<dyn ExportSink>,
    ) -> Self {
        tracing::info!(
            effects = catalog.effects().len(),
            disadvantage_cap = rules.disadvantage_cap,
            "session created"
        );
        let delay = config.export_reset_delay;
        Self {
            workbench: Workbench::new(catalog, rules),
            tree: TechniqueTree::new(),
            sink,
            text_export: ExportSurface::new(ExportKind::Text, delay),
            image_export: ExportSurface::new(ExportKind::Image, delay),
            manual_export: ExportSurface::new(ExportKind::Manual, delay),
            config,
        }
    }

    /// Loads content from a data directory.
    pub fn from_factory(
        factory: &ContentFactory,
        config: SessionConfig,
        sink: Arc<dyn ExportSink>,
    ) -> Result<Self> {
        let catalog = factory.load_catalog().map_err(SessionError::Content)?;
        let rules = factory.load_rules().map_err(SessionError::Content)?;
        Ok(Self::new(Arc::new(catalog), rules, config, sink))
    }

    /// Uses `config.data_dir` when set, the built-in content otherwise.
    pub fn open(config: SessionConfig, sink: Arc<dyn ExportSink>) -> Result<Self> {
        match config.data_dir.clone() {
            Some(dir) => Self::from_factory(&ContentFactory::new(dir), config, sink),
            None => {
                let catalog = builtin_catalog().map_err(SessionError::Content)?;
                let rules = builtin_rules().map_err(SessionError::Content)?;
                Ok(Self::new(Arc::new(catalog), rules, config, sink))
            }
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.workbench.catalog()
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    pub fn workbench_mut(&mut self) -> &mut Workbench {
        &mut self.workbench
    }

    pub fn technique(&self) -> &Technique {
        self.workbench.technique()
    }

    pub fn tree(&self) -> &TechniqueTree {
        &self.tree
    }

    // ------------------------------------------------------------------
    // Technique under edit
    // ------------------------------------------------------------------

    pub fn set_level(&mut self, level: PowerLevel) {
        tracing::debug!(%level, "level selected");
        self.workbench.set_level(level);
    }

    pub fn set_force(&mut self, force: Option<Force>) {
        self.workbench.set_force(force);
        let incompatible = self.workbench.incompatible_effects();
        if !incompatible.is_empty() {
            tracing::warn!(
                count = incompatible.len(),
                "force forbids effects already in the technique"
            );
        }
    }

    /// Starts configuring a catalog effect at the current level.
    pub fn draft(&self, effect_id: &str) -> Result<EffectDraft> {
        let effect = self
            .catalog()
            .effect(effect_id)
            .ok_or_else(|| SessionError::UnknownEffect(effect_id.to_owned()))?;
        Ok(self.workbench.draft(effect))
    }

    pub fn add_draft(&mut self, draft: EffectDraft) -> Result<InstanceId> {
        let effect_id = draft.effect().id.clone();
        match self.workbench.add_draft(draft) {
            Ok(id) => {
                tracing::debug!(%effect_id, instance = %id, "effect added");
                Ok(id)
            }
            Err(error) => {
                tracing::info!(%effect_id, %error, "effect rejected");
                Err(error.into())
            }
        }
    }

    pub fn remove_effect(&mut self, id: InstanceId) -> Result<()> {
        self.workbench.remove_effect(id)?;
        tracing::debug!(instance = %id, "effect removed");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.workbench.reset();
        tracing::debug!("workbench reset");
    }

    /// Commits the technique under edit to the tree and clears the workbench.
    pub fn save_technique(&mut self) -> Result<TechniqueId> {
        if self.workbench.technique().level.is_none() {
            return Err(SessionError::LevelNotSelected);
        }
        let technique = self.workbench.take();
        let id = self.tree.commit(technique);
        tracing::info!(%id, saved = self.tree.len(), "technique saved");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    pub fn connect(&mut self, source: &TechniqueId, target: &TechniqueId) -> Result<Edge> {
        let edge = self.tree.on_connect(source, target)?;
        tracing::debug!(%edge, "techniques connected");
        Ok(edge)
    }

    /// Applies an edit/delete intent raised by the graph surface.
    ///
    /// Edit replaces whatever is on the workbench with the saved technique.
    pub fn handle_intent(&mut self, intent: TreeIntent) -> Result<()> {
        match intent {
            TreeIntent::Edit(id) => {
                let technique = self
                    .tree
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| TreeError::UnknownTechnique(id.clone()))?;
                self.workbench.load(technique);
                tracing::debug!(%id, "technique loaded for editing");
            }
            TreeIntent::Delete(id) => {
                self.tree.remove(&id)?;
                tracing::info!(%id, "technique deleted");
            }
        }
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        self.tree.layout(&self.workbench.rules().grid)
    }

    // ------------------------------------------------------------------
    // Exports
    // ------------------------------------------------------------------

    /// Copies the text summary of the technique under edit.
    pub fn export_text(&self) -> Result<ExportHandle> {
        let technique = self.workbench.technique();
        let content = text_summary(technique, &self.workbench.report())?;
        let file_name = format!("{}.txt", file_stem(&technique.name));
        self.text_export
            .start(Arc::clone(&self.sink), ExportArtifact::Text { file_name, content })
    }

    /// Hands the technique panel to the image renderer.
    pub fn export_image(&self) -> Result<ExportHandle> {
        let technique = self.workbench.technique();
        if technique.level.is_none() {
            return Err(SessionError::LevelNotSelected);
        }
        let artifact = ExportArtifact::Image {
            file_name: image_file_name(&technique.name),
            technique: Box::new(technique.clone()),
            report: self.workbench.report(),
        };
        self.image_export.start(Arc::clone(&self.sink), artifact)
    }

    pub fn export_manual(&self) -> Result<ExportHandle> {
        let artifact = ExportArtifact::Manual {
            file_name: MANUAL_FILE_NAME.to_owned(),
            content: markdown_manual(self.catalog()),
        };
        self.manual_export.start(Arc::clone(&self.sink), artifact)
    }

    pub fn export_surface(&self, kind: ExportKind) -> &ExportSurface {
        match kind {
            ExportKind::Text => &self.text_export,
            ExportKind::Image => &self.image_export,
            ExportKind::Manual => &self.manual_export,
        }
    }

    pub fn export_status(&self, kind: ExportKind) -> ExportStatus {
        self.export_surface(kind).status()
    }
}
