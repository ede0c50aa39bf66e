//! Tagged contexts attached to nodes.
//!
//! A context is a value of the scene's context type `C` stored on a node
//! under a [`ContextKind`] tag. Lookups walk the tree by tag.

use arbor_core::SceneError;

use crate::tree::{NodeId, Scene};

/// Tag naming a kind of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKind(pub &'static str);

impl<C> Scene<C> {
    /// Attach a context to a node, returning the value it replaces.
    pub fn attach_context(&mut self, id: NodeId, kind: ContextKind, value: C) -> Result<Option<C>, SceneError> {
        Ok(self.node_mut(id)?.contexts.insert(kind, value))
    }

    /// Remove a context from a node.
    pub fn detach_context(&mut self, id: NodeId, kind: ContextKind) -> Result<Option<C>, SceneError> {
        Ok(self.node_mut(id)?.contexts.shift_remove(&kind))
    }

    /// Context attached directly to a node.
    pub fn context(&self, id: NodeId, kind: ContextKind) -> Option<&C> {
        self.get(id).and_then(|node| node.contexts.get(&kind))
    }

    /// Nearest ancestor (excluding the node itself) carrying a context of `kind`.
    pub fn find_ancestor_context(&self, id: NodeId, kind: ContextKind) -> Option<(NodeId, &C)> {
        self.ancestors(id)
            .into_iter()
            .find_map(|ancestor| self.context(ancestor, kind).map(|value| (ancestor, value)))
    }

    /// First descendant in pre-order (excluding the node itself) carrying a context of `kind`.
    pub fn find_descendant_context(&self, id: NodeId, kind: ContextKind) -> Option<(NodeId, &C)> {
        self.descendants(id)
            .into_iter()
            .find_map(|descendant| self.context(descendant, kind).map(|value| (descendant, value)))
    }
}
