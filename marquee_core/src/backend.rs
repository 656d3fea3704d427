// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Platform work lives in separate crates. Each integration provides:
//!
//! - **Tick source**: produces [`FrameTick`] values from a platform mechanism
//!   (`requestAnimationFrame`, a winit redraw loop). Not abstracted by a
//!   trait because setup and lifecycle differ fundamentally across platforms.
//!
//! - **Input**: forwards pointer, touch, and wheel events to the
//!   [`Carousel`](crate::engine::Carousel) handlers.
//!
//! - **Presenters**: implement [`Presenter`] to draw a [`Frame`]. The GPU
//!   renderer draws the cards; the web backend also presents captions as
//!   DOM elements.
//!
//! [`FrameTick`]: crate::timing::FrameTick

use crate::camera::Camera;
use crate::card::{Card, CardMetrics, ImageState};
use crate::config::GalleryItem;
use crate::scene::{FrameChanges, SceneGraph};

/// Everything a presenter needs to draw one frame.
///
/// Borrowed from the [`Carousel`](crate::engine::Carousel) for the duration
/// of one [`tick`](crate::engine::Carousel::tick).
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Evaluated scene graph.
    pub scene: &'a SceneGraph,
    /// What changed since the previous frame.
    pub changes: &'a FrameChanges,
    /// Camera with a usable viewport.
    pub camera: &'a Camera,
    /// Render slots in strip order.
    pub cards: &'a [Card],
    /// Card sizing for this frame.
    pub metrics: CardMetrics,
    /// Gallery items, indexed by logical index.
    pub items: &'a [GalleryItem],
    /// Image load state, indexed by logical index.
    pub images: &'a [ImageState],
    /// Corner radius of the card mask, in UV units.
    pub border_radius: f32,
    /// Logical index last reported to the host.
    pub active: Option<usize>,
    /// Whether the active card is in its post-change dwell.
    pub emphasized: bool,
}

impl Frame<'_> {
    /// Cards in back-to-front draw order (the scene traversal order).
    pub fn cards_in_draw_order(&self) -> impl Iterator<Item = &Card> + '_ {
        self.scene.traversal_order().iter().filter_map(|&slot| {
            self.cards
                .iter()
                .find(|card| card.node.index() == slot)
        })
    }
}

/// Draws evaluated frames.
///
/// Both the wgpu renderer and the DOM caption presenter implement this
/// trait, enabling generic frame loops and test doubles.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     // Timers, input-driven targets, easing, layout, scene evaluation.
///     let Some(frame) = carousel.tick(tick) else {
///         return; // zero-area viewport or destroyed
///     };
///     renderer.apply(&frame);
///     captions.apply(&frame);
/// }
/// ```
pub trait Presenter {
    /// Draws `frame`.
    fn apply(&mut self, frame: &Frame<'_>);
}
