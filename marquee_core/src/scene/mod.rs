// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode scene graph.
//!
//! A *node* is a transform in an ordered tree. Each node has:
//!
//! - An identity ([`NodeId`]), an index handle that goes stale when the graph
//!   is [cleared](SceneGraph::clear).
//! - Topology: parent, first-child, and sibling links.
//! - **Local properties** set by the caller:
//!   [`transform`](SceneGraph::set_transform),
//!   [`opacity`](SceneGraph::set_opacity), and
//!   [`content`](SceneGraph::set_content) (a [`TextureId`]).
//! - **Computed properties** produced by [`evaluate`](SceneGraph::evaluate):
//!   `world_transform` and `effective_opacity`.
//!
//! The carousel's tree is two levels deep: a strip node translated by the
//! scroll offset, and one child per render slot carrying the card's curve
//! placement. Nodes are stored in struct-of-arrays layout with index handles.

mod evaluate;
mod id;
mod store;

pub use evaluate::FrameChanges;
pub use id::{INVALID, NodeId, TextureId};
pub use store::SceneGraph;
