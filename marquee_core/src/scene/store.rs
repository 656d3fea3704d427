// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with topology and property management.

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, NodeId, TextureId};
use crate::dirty;
use crate::transform::Transform3d;

/// Struct-of-arrays storage for all scene nodes.
///
/// Nodes are addressed by [`NodeId`] handles. The carousel builds its whole
/// tree once (a strip node with one child per render slot) and tears it down
/// as a unit with [`clear`](Self::clear), so there is no per-node removal.
#[derive(Debug)]
pub struct SceneGraph {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) last_child: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local_transform: Vec<Transform3d>,
    pub(crate) local_opacity: Vec<f32>,
    pub(crate) content: Vec<Option<TextureId>>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Transform3d>,
    pub(crate) effective_opacity: Vec<f32>,

    pub(crate) len: u32,
    pub(crate) epoch: u32,

    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates an empty scene graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            last_child: Vec::new(),
            local_transform: Vec::new(),
            local_opacity: Vec::new(),
            content: Vec::new(),
            world_transform: Vec::new(),
            effective_opacity: Vec::new(),
            len: 0,
            epoch: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Creates a new node and returns its handle.
    ///
    /// The node starts with an identity transform, full opacity, no content,
    /// and no parent.
    pub fn create_node(&mut self) -> NodeId {
        let idx = self.len;
        self.len += 1;
        self.parent.push(INVALID);
        self.first_child.push(INVALID);
        self.next_sibling.push(INVALID);
        self.last_child.push(INVALID);
        self.local_transform.push(Transform3d::IDENTITY);
        self.local_opacity.push(1.0);
        self.content.push(None);
        self.world_transform.push(Transform3d::IDENTITY);
        self.effective_opacity.push(1.0);

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        NodeId {
            idx,
            epoch: self.epoch,
        }
    }

    /// Removes every node.
    ///
    /// All previously issued handles become stale. The next
    /// [`evaluate`](Self::evaluate) reports every former slot in
    /// [`FrameChanges::removed`](super::FrameChanges::removed).
    pub fn clear(&mut self) {
        self.pending_removed.extend(0..self.len);
        self.pending_added.clear();
        self.parent.clear();
        self.first_child.clear();
        self.next_sibling.clear();
        self.last_child.clear();
        self.local_transform.clear();
        self.local_opacity.clear();
        self.content.clear();
        self.world_transform.clear();
        self.effective_opacity.clear();
        self.traversal_order.clear();
        self.len = 0;
        self.epoch = self.epoch.wrapping_add(1);
        self.dirty = DirtyTracker::with_cycle_handling(CycleHandling::Error);
        self.traversal_dirty = true;
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len && id.epoch == self.epoch
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        let last = self.last_child[p as usize];
        if last == INVALID {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[last as usize] = c;
        }
        self.last_child[p as usize] = c;

        // Child depends on parent for both inherited channels.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark_with(c, dirty::OPACITY, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local transform of a node.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Transform3d {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the local opacity of a node.
    #[must_use]
    pub fn local_opacity(&self, id: NodeId) -> f32 {
        self.validate(id);
        self.local_opacity[id.idx as usize]
    }

    /// Returns the texture bound to a node.
    #[must_use]
    pub fn content(&self, id: NodeId) -> Option<TextureId> {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Returns the computed world transform of a node.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Transform3d {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the computed effective opacity of a node.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_opacity(&self, id: NodeId) -> f32 {
        self.validate(id);
        self.effective_opacity[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local transform of a node.
    ///
    /// Setting the value the node already has is a no-op and marks nothing.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform3d) {
        self.validate(id);
        if self.local_transform[id.idx as usize] == transform {
            return;
        }
        self.local_transform[id.idx as usize] = transform;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the local opacity of a node.
    ///
    /// Setting the value the node already has is a no-op and marks nothing.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        self.validate(id);
        if self.local_opacity[id.idx as usize] == opacity {
            return;
        }
        self.local_opacity[id.idx as usize] = opacity;
        self.dirty.mark_with(id.idx, dirty::OPACITY, &EagerPolicy);
    }

    /// Binds a texture to a node.
    pub fn set_content(&mut self, id: NodeId, content: Option<TextureId>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
        self.dirty.mark(id.idx, dirty::CONTENT);
    }

    /// Re-marks the content channel of every node showing `texture`.
    ///
    /// Called when the texture's pixels arrive so presenters can rebind.
    pub fn touch_content(&mut self, texture: TextureId) {
        for idx in 0..self.len {
            if self.content[idx as usize] == Some(texture) {
                self.dirty.mark(idx, dirty::CONTENT);
            }
        }
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `FrameChanges` and the
    // traversal order) rather than `NodeId` handles.

    /// Returns the computed world transform at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn world_transform_at(&self, idx: u32) -> Transform3d {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.world_transform[idx as usize]
    }

    /// Returns the computed effective opacity at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn effective_opacity_at(&self, idx: u32) -> f32 {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.effective_opacity[idx as usize]
    }

    /// Returns the bound texture at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> Option<TextureId> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.content[idx as usize]
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current epoch {}, len {})",
            self.epoch,
            self.len
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_and_query() {
        let mut graph = SceneGraph::new();
        let strip = graph.create_node();
        let a = graph.create_node();
        let b = graph.create_node();

        graph.add_child(strip, a);
        graph.add_child(strip, b);

        assert_eq!(graph.parent[a.idx as usize], strip.idx);
        assert_eq!(graph.parent[strip.idx as usize], INVALID);
        assert_eq!(graph.first_child[strip.idx as usize], a.idx);
        assert_eq!(graph.next_sibling[a.idx as usize], b.idx);
        assert_eq!(graph.next_sibling[b.idx as usize], INVALID);

        let _ = graph.evaluate();
        assert_eq!(graph.traversal_order(), &[strip.idx, a.idx, b.idx]);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_attach_panics() {
        let mut graph = SceneGraph::new();
        let p = graph.create_node();
        let c = graph.create_node();
        graph.add_child(p, c);
        graph.add_child(p, c);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        assert!(graph.is_alive(id));
        graph.clear();
        assert!(!graph.is_alive(id));
        assert!(graph.is_empty());

        let fresh = graph.create_node();
        assert_eq!(fresh.index(), id.index(), "slots restart at zero");
        assert!(graph.is_alive(fresh));
        assert!(!graph.is_alive(id), "old epoch stays stale");
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn stale_handle_panics_on_set_transform() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        graph.clear();
        graph.set_transform(id, Transform3d::IDENTITY);
    }

    #[test]
    fn unchanged_transform_marks_nothing() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        let xf = Transform3d::from_translation(1.0, 0.0, 0.0);
        graph.set_transform(id, xf);
        let _ = graph.evaluate();

        graph.set_transform(id, xf);
        graph.set_opacity(id, 1.0);
        let changes = graph.evaluate();
        assert!(changes.transforms.is_empty(), "same transform is a no-op");
        assert!(changes.opacities.is_empty(), "same opacity is a no-op");
    }

    #[test]
    fn set_content_marks_dirty() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        let _ = graph.evaluate();

        graph.set_content(id, Some(TextureId(3)));
        let changes = graph.evaluate();
        assert!(changes.content.contains(&id.index()));
        assert_eq!(graph.content(id), Some(TextureId(3)));
    }

    #[test]
    fn touch_content_marks_every_copy() {
        let mut graph = SceneGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        let other = graph.create_node();
        graph.set_content(a, Some(TextureId(0)));
        graph.set_content(b, Some(TextureId(0)));
        graph.set_content(other, Some(TextureId(1)));
        let _ = graph.evaluate();

        graph.touch_content(TextureId(0));
        let changes = graph.evaluate();
        assert_eq!(changes.content.len(), 2);
        assert!(changes.content.contains(&a.index()));
        assert!(changes.content.contains(&b.index()));
    }
}
