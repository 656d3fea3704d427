// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene graph uses multi-channel dirty tracking (via [`understory_dirty`])
//! so that a frame in which the carousel is at rest touches nothing.
//!
//! - **Propagating**: [`TRANSFORM`] and [`OPACITY`] are marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency edges
//!   from child to parent. Moving the strip node marks every card under it.
//! - **Local-only**: [`CONTENT`] is marked with the default policy. A texture
//!   becoming ready affects only the node that shows it.
//! - **Structural**: [`TOPOLOGY`] is marked on node creation and attachment
//!   and triggers a traversal-order rebuild during evaluation.
//!
//! Each [`SceneGraph::evaluate`](crate::scene::SceneGraph::evaluate) call
//! drains all channels into [`FrameChanges`](crate::scene::FrameChanges).

use understory_dirty::Channel;

/// Local transform changed; descendants need their world transform.
pub const TRANSFORM: Channel = Channel::new(0);

/// Opacity changed; descendants need their effective opacity.
pub const OPACITY: Channel = Channel::new(1);

/// Bound texture changed.
pub const CONTENT: Channel = Channel::new(2);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(3);
