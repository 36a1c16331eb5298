//! Saved techniques and their parent/child relation.
//!
//! [`TechniqueTree`] owns every committed technique. The relation is kept
//! acyclic and every `parent_id` references a stored technique: connecting
//! into a cycle is rejected and removing a technique detaches its children.

mod layout;

pub use layout::{Edge, GridLayout, Layout, Node, Position, derive_layout};

use crate::error::{ErrorSeverity, RulesError};
use crate::technique::{Technique, TechniqueId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no saved technique with id '{0}'")]
    UnknownTechnique(TechniqueId),

    #[error("technique '{0}' cannot be its own parent")]
    SelfParent(TechniqueId),

    #[error("making '{parent}' the parent of '{child}' would create a cycle")]
    Cycle {
        parent: TechniqueId,
        child: TechniqueId,
    },
}

impl RulesError for TreeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTechnique(_) => "TREE_UNKNOWN_TECHNIQUE",
            Self::SelfParent(_) => "TREE_SELF_PARENT",
            Self::Cycle { .. } => "TREE_CYCLE",
        }
    }
}

/// Structural intent raised by the graph surface for the host to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeIntent {
    /// Load the technique back into the workbench.
    Edit(TechniqueId),
    Delete(TechniqueId),
}

impl TreeIntent {
    pub fn target(&self) -> &TechniqueId {
        match self {
            Self::Edit(id) | Self::Delete(id) => id,
        }
    }
}

/// Collection of saved techniques in commit order.
#[derive(Clone, Debug, Default)]
pub struct TechniqueTree {
    techniques: Vec<Technique>,
    next_id: u64,
}

impl TechniqueTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn get(&self, id: &TechniqueId) -> Option<&Technique> {
        self.techniques
            .iter()
            .find(|technique| technique.id.as_ref() == Some(id))
    }

    pub fn contains(&self, id: &TechniqueId) -> bool {
        self.get(id).is_some()
    }

    /// Admits a technique into the tree.
    ///
    /// Techniques without an id get a fresh `tech-N` id and are appended. A
    /// technique whose id is already stored replaces the stored copy in
    /// place and keeps the stored parent; links only change through
    /// [`Self::on_connect`] and [`Self::detach`]. For new techniques, a parent
    /// that is not stored (or would close a cycle) is dropped.
    pub fn commit(&mut self, mut technique: Technique) -> TechniqueId {
        let id = match technique.id.clone() {
            Some(id) => id,
            None => self.fresh_id(),
        };
        technique.id = Some(id.clone());

        if let Some(index) = self.index_of(&id) {
            technique.parent_id = self.techniques[index].parent_id.take();
            self.techniques[index] = technique;
            return id;
        }

        if let Some(parent) = technique.parent_id.take() {
            let keeps_parent = parent != id && self.contains(&parent) && !self.is_ancestor(&id, &parent);
            if keeps_parent {
                technique.parent_id = Some(parent);
            }
        }
        self.techniques.push(technique);
        id
    }

    /// Reparents `target` under `source` and returns the new edge.
    pub fn on_connect(
        &mut self,
        source: &TechniqueId,
        target: &TechniqueId,
    ) -> Result<Edge, TreeError> {
        if !self.contains(source) {
            return Err(TreeError::UnknownTechnique(source.clone()));
        }
        let index = self
            .index_of(target)
            .ok_or_else(|| TreeError::UnknownTechnique(target.clone()))?;
        if source == target {
            return Err(TreeError::SelfParent(target.clone()));
        }
        if self.is_ancestor(target, source) {
            return Err(TreeError::Cycle {
                parent: source.clone(),
                child: target.clone(),
            });
        }

        self.techniques[index].parent_id = Some(source.clone());
        Ok(Edge::between(source, target))
    }

    /// Clears the parent of `id`, returning the previous parent.
    pub fn detach(&mut self, id: &TechniqueId) -> Result<Option<TechniqueId>, TreeError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| TreeError::UnknownTechnique(id.clone()))?;
        Ok(self.techniques[index].parent_id.take())
    }

    /// Deletes a technique. Its direct children become roots.
    pub fn remove(&mut self, id: &TechniqueId) -> Result<Technique, TreeError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| TreeError::UnknownTechnique(id.clone()))?;
        let removed = self.techniques.remove(index);

        for technique in &mut self.techniques {
            if technique.parent_id.as_ref() == Some(id) {
                technique.parent_id = None;
            }
        }
        Ok(removed)
    }

    pub fn children<'a>(&'a self, id: &'a TechniqueId) -> impl Iterator<Item = &'a Technique> {
        self.techniques
            .iter()
            .filter(move |technique| technique.parent_id.as_ref() == Some(id))
    }

    pub fn roots(&self) -> impl Iterator<Item = &Technique> {
        self.techniques
            .iter()
            .filter(|technique| technique.parent_id.is_none())
    }

    pub fn layout(&self, grid: &GridLayout) -> Layout {
        derive_layout(&self.techniques, grid)
    }

    fn index_of(&self, id: &TechniqueId) -> Option<usize> {
        self.techniques
            .iter()
            .position(|technique| technique.id.as_ref() == Some(id))
    }

    /// True when `ancestor` is reached walking up from `id` (inclusive).
    fn is_ancestor(&self, ancestor: &TechniqueId, id: &TechniqueId) -> bool {
        let mut current = Some(id);
        // Bounded by the collection size; a cycle can't be stored, so
        // the walk ends at a root.
        for _ in 0..=self.techniques.len() {
            match current {
                Some(node) if node == ancestor => return true,
                Some(node) => current = self.get(node).and_then(|t| t.parent_id.as_ref()),
                None => return false,
            }
        }
        false
    }

    fn fresh_id(&mut self) -> TechniqueId {
        loop {
            self.next_id += 1;
            let id = TechniqueId(format!("tech-{}", self.next_id));
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(names: &[&str]) -> (TechniqueTree, Vec<TechniqueId>) {
        let mut tree = TechniqueTree::new();
        let ids = names
            .iter()
            .map(|name| tree.commit(Technique::named(*name)))
            .collect();
        (tree, ids)
    }

    #[test]
    fn commit_assigns_sequential_ids() {
        let (tree, ids) = tree_of(&["A", "B"]);
        assert_eq!(ids[0].as_str(), "tech-1");
        assert_eq!(ids[1].as_str(), "tech-2");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn commit_with_known_id_replaces_in_place() {
        let (mut tree, ids) = tree_of(&["A", "B"]);
        let edited = Technique::named("A2").with_id(ids[0].clone());
        assert_eq!(tree.commit(edited), ids[0]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.techniques()[0].name, "A2");
    }

    #[test]
    fn recommit_keeps_stored_parent() {
        let (mut tree, ids) = tree_of(&["A", "B", "C"]);
        tree.on_connect(&ids[0], &ids[2]).unwrap();
        let editing = tree.get(&ids[2]).cloned().unwrap();

        tree.on_connect(&ids[1], &ids[2]).unwrap();
        tree.commit(editing.clone());
        assert_eq!(tree.get(&ids[2]).unwrap().parent_id.as_ref(), Some(&ids[1]));

        tree.detach(&ids[2]).unwrap();
        tree.commit(editing);
        assert_eq!(tree.get(&ids[2]).unwrap().parent_id, None);
    }

    #[test]
    fn commit_drops_dangling_parent() {
        let mut tree = TechniqueTree::new();
        let id = tree.commit(Technique::named("A").with_parent("ghost"));
        assert_eq!(tree.get(&id).and_then(|t| t.parent_id.clone()), None);
    }

    #[test]
    fn connect_reparents_and_returns_edge() {
        let (mut tree, ids) = tree_of(&["A", "B", "C"]);
        let edge = tree.on_connect(&ids[0], &ids[1]).unwrap();
        assert_eq!(edge.id, "e-tech-1-tech-2");
        assert_eq!(tree.get(&ids[1]).unwrap().parent_id.as_ref(), Some(&ids[0]));

        tree.on_connect(&ids[2], &ids[1]).unwrap();
        assert_eq!(tree.children(&ids[2]).count(), 1);
        assert_eq!(tree.children(&ids[0]).count(), 0);
    }

    #[test]
    fn connect_rejects_cycles_and_self_links() {
        let (mut tree, ids) = tree_of(&["A", "B", "C"]);
        tree.on_connect(&ids[0], &ids[1]).unwrap();
        tree.on_connect(&ids[1], &ids[2]).unwrap();

        let err = tree.on_connect(&ids[2], &ids[0]).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
        assert_eq!(err.error_code(), "TREE_CYCLE");
        assert_eq!(tree.get(&ids[0]).unwrap().parent_id, None);

        assert_eq!(
            tree.on_connect(&ids[1], &ids[1]),
            Err(TreeError::SelfParent(ids[1].clone()))
        );
        assert_eq!(
            tree.on_connect(&TechniqueId::from("nope"), &ids[1]),
            Err(TreeError::UnknownTechnique(TechniqueId::from("nope")))
        );
    }

    #[test]
    fn remove_detaches_children() {
        let (mut tree, ids) = tree_of(&["A", "B", "C"]);
        tree.on_connect(&ids[0], &ids[1]).unwrap();
        tree.on_connect(&ids[0], &ids[2]).unwrap();

        let removed = tree.remove(&ids[0]).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(tree.roots().count(), 2);
        assert!(tree.layout(&GridLayout::default()).edges.is_empty());
    }

    #[test]
    fn detach_returns_previous_parent() {
        let (mut tree, ids) = tree_of(&["A", "B"]);
        tree.on_connect(&ids[0], &ids[1]).unwrap();
        assert_eq!(tree.detach(&ids[1]), Ok(Some(ids[0].clone())));
        assert_eq!(tree.detach(&ids[1]), Ok(None));
    }

    #[test]
    fn fresh_ids_skip_taken_ones() {
        let mut tree = TechniqueTree::new();
        tree.commit(Technique::named("X").with_id("tech-1"));
        let id = tree.commit(Technique::named("Y"));
        assert_eq!(id.as_str(), "tech-2");
    }

    #[test]
    fn intent_target() {
        let id = TechniqueId::from("tech-3");
        assert_eq!(TreeIntent::Edit(id.clone()).target(), &id);
        assert_eq!(TreeIntent::Delete(id.clone()).target(), &id);
    }
}
