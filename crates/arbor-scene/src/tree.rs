//! Scene tree data structures.
//!
//! The scene owns every node; nodes refer to their parent and children by
//! `NodeId` only. Setters on `Scene` mark nodes dirty so the next
//! [`Scene::update`] re-resolves them.

use std::collections::HashMap;
use std::fmt;

use arbor_core::{BoxModel, Metric, SceneError, Transformation};
use arbor_layout::Arrangement;
use glam::Vec2;
use indexmap::IndexMap;

use crate::context::ContextKind;
use crate::options::{validate_viewport, SceneOptions};

/// Unique identifier for a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declarative description of a node to insert.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    name: Option<String>,
    box_model: BoxModel,
    transforms: Vec<Transformation>,
    arrangement: Arrangement,
    visible: bool,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new(BoxModel::default())
    }
}

impl NodeBuilder {
    pub fn new(box_model: impl Into<BoxModel>) -> Self {
        Self {
            name: None,
            box_model: box_model.into(),
            transforms: Vec::new(),
            arrangement: Arrangement::Free,
            visible: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append one step to the transform stack.
    pub fn with_transform(mut self, transform: Transformation) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn with_transforms(mut self, transforms: Vec<Transformation>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_arrangement(mut self, arrangement: impl Into<Arrangement>) -> Self {
        self.arrangement = arrangement.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A node in the scene tree.
#[derive(Debug, Clone)]
pub struct Node<C = ()> {
    pub(crate) id: NodeId,
    pub(crate) name: Option<String>,
    pub(crate) box_model: BoxModel,
    pub(crate) transforms: Vec<Transformation>,
    pub(crate) arrangement: Arrangement,
    pub(crate) visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) contexts: IndexMap<ContextKind, C>,
    /// Box model resolved against the parent, before transforms
    pub(crate) modeled: Metric,
    /// Final metric after the transform stack
    pub(crate) metric: Metric,
    pub(crate) dirty: bool,
}

impl<C> Node<C> {
    fn from_builder(id: NodeId, parent: Option<NodeId>, builder: NodeBuilder) -> Self {
        Self {
            id,
            name: builder.name,
            box_model: builder.box_model,
            transforms: builder.transforms,
            arrangement: builder.arrangement,
            visible: builder.visible,
            parent,
            children: Vec::new(),
            contexts: IndexMap::new(),
            modeled: Metric::default(),
            metric: Metric::default(),
            dirty: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn box_model(&self) -> &BoxModel {
        &self.box_model
    }

    pub fn transforms(&self) -> &[Transformation] {
        &self.transforms
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Metric from the box model alone, as of the last update.
    pub fn modeled_metric(&self) -> &Metric {
        &self.modeled
    }

    /// Final metric including the transform stack, as of the last update.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// True if the cached metrics are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Attached contexts in attachment order.
    pub fn contexts(&self) -> impl Iterator<Item = (ContextKind, &C)> {
        self.contexts.iter().map(|(kind, value)| (*kind, value))
    }
}

/// A retained scene: an arena of nodes plus the viewport they resolve in.
#[derive(Debug, Clone)]
pub struct Scene<C = ()> {
    pub(crate) nodes: HashMap<NodeId, Node<C>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) options: SceneOptions,
    next_id: u64,
}

impl<C> Default for Scene<C> {
    fn default() -> Self {
        Self::from_valid_options(SceneOptions::default())
    }
}

impl<C> Scene<C> {
    /// Create an empty scene.
    pub fn new(options: SceneOptions) -> Result<Self, SceneError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    /// Create an empty scene with default options and the given viewport.
    pub fn with_viewport(viewport: Vec2) -> Result<Self, SceneError> {
        Self::new(SceneOptions::default().with_viewport(viewport))
    }

    fn from_valid_options(options: SceneOptions) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            options,
            next_id: 0,
        }
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn viewport(&self) -> Vec2 {
        self.options.viewport
    }

    /// Change the viewport size. Every root is re-resolved on the next update.
    pub fn set_viewport(&mut self, viewport: Vec2) -> Result<(), SceneError> {
        validate_viewport(viewport)?;
        if viewport != self.options.viewport {
            self.options.viewport = viewport;
            for root in self.roots.clone() {
                self.mark_dirty(root);
            }
        }
        Ok(())
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a top-level node.
    pub fn add_root(&mut self, builder: NodeBuilder) -> NodeId {
        let id = self.next_id();
        self.nodes.insert(id, Node::from_builder(id, None, builder));
        self.roots.push(id);
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, builder: NodeBuilder) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let id = self.next_id();
        self.nodes.insert(id, Node::from_builder(id, Some(parent), builder));

        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(id);
        // Siblings may be redistributed by the parent's arrangement.
        parent_node.dirty = true;
        Ok(id)
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.node(id)?;
        let doomed = self.descendants(id);
        self.detach(id);
        for node in doomed {
            self.nodes.remove(&node);
        }
        self.nodes.remove(&id);
        Ok(())
    }

    /// Move a node under a new parent, or to the top level with `None`.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        self.node(id)?;
        if let Some(parent) = new_parent {
            self.node(parent)?;
            if parent == id || self.ancestors(parent).contains(&id) {
                return Err(SceneError::Cycle { node: id.0, parent: parent.0 });
            }
        }

        self.detach(id);
        match new_parent {
            Some(parent) => {
                let parent_node = self.node_mut(parent)?;
                parent_node.children.push(id);
                parent_node.dirty = true;
            }
            None => self.roots.push(id),
        }
        let node = self.node_mut(id)?;
        node.parent = new_parent;
        node.dirty = true;
        Ok(())
    }

    /// Unlink a node from its parent (or the root list) without dropping it.
    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|&child| child != id);
                    parent_node.dirty = true;
                }
            }
            None => self.roots.retain(|&root| root != id),
        }
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(&id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node<C>, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound { id: id.0 })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<C>, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound { id: id.0 })
    }

    fn mark_dirty(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dirty = true;
        }
    }

    /// Replace a node's box model. An arranged parent is marked dirty too, so
    /// its arrangement rewrites the new model before the node resolves.
    pub fn set_box_model(&mut self, id: NodeId, box_model: BoxModel) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.box_model = box_model;
        node.dirty = true;
        let parent = node.parent;

        if let Some(parent) = parent {
            let arranged = self.nodes.get(&parent).is_some_and(|p| !p.arrangement.is_free());
            if arranged {
                self.mark_dirty(parent);
            }
        }
        Ok(())
    }

    pub fn set_transforms(&mut self, id: NodeId, transforms: Vec<Transformation>) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.transforms = transforms;
        node.dirty = true;
        Ok(())
    }

    /// Append one step to a node's transform stack.
    pub fn push_transform(&mut self, id: NodeId, transform: Transformation) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.transforms.push(transform);
        node.dirty = true;
        Ok(())
    }

    pub fn set_arrangement(&mut self, id: NodeId, arrangement: impl Into<Arrangement>) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.arrangement = arrangement.into();
        node.dirty = true;
        Ok(())
    }

    /// Show or hide a node. Hidden nodes still resolve but are skipped when drawing.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Get children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<C>> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|child_id| self.nodes.get(child_id))
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(parent) = current {
            result.push(parent);
            current = self.nodes.get(&parent).and_then(|n| n.parent);
        }
        result
    }

    /// Descendants of a node in pre-order, excluding the node itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&id) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return result,
        };
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// Every node in pre-order, roots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<C>> {
        self.roots
            .iter()
            .flat_map(|&root| std::iter::once(root).chain(self.descendants(root)))
            .filter_map(|id| self.nodes.get(&id))
    }

    /// First node in pre-order with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|node| node.name() == Some(name)).map(Node::id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
