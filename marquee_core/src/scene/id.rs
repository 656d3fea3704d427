// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and texture identity types.

use std::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// Carries the graph epoch it was created in, so handles held across a
/// [`clear`](super::SceneGraph::clear) are detected as stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) epoch: u32,
}

impl NodeId {
    /// Returns the raw slot index.
    ///
    /// Slot indices are what [`FrameChanges`](super::FrameChanges) and the
    /// traversal order report.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@{})", self.idx, self.epoch)
    }
}

/// An opaque reference to a GPU texture.
///
/// The carousel assigns one texture per logical gallery item; every render
/// slot showing that item binds the same id. Renderers map the id to the
/// uploaded image, or to a transparent placeholder until it arrives.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u32);

impl fmt::Debug for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureId({})", self.0)
    }
}
