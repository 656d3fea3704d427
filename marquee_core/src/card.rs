// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render slots.
//!
//! A [`Card`] is one on-screen copy of a gallery item. The carousel lays
//! `copies × items` cards end to end; each owns a scene node whose local
//! transform places it on the arc, and binds its item's shared texture.

use kurbo::Size;

use crate::layout::{self, SCALE_LERP};
use crate::scene::{NodeId, TextureId};
use crate::scroll::{Direction, ScrollState};
use crate::transform::Transform3d;

/// Card height as a fraction of the viewport height.
pub const HEIGHT_RATIO: f64 = 0.6;

/// Card width over height.
pub const ASPECT: f64 = 2.0 / 3.0;

/// World-space gap between neighbouring cards.
pub const GAP: f64 = 2.0;

/// Shader time advance per frame.
pub const TIME_STEP: f64 = 0.04;

/// Card size and spacing derived from the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardMetrics {
    /// Card width in world units.
    pub width: f64,
    /// Card height in world units.
    pub height: f64,
    /// Distance between neighbouring slot centers.
    pub stride: f64,
}

impl CardMetrics {
    /// Sizes cards for a world-space viewport.
    #[must_use]
    pub fn for_viewport(viewport: Size) -> Self {
        let height = viewport.height * HEIGHT_RATIO;
        let width = height * ASPECT;
        Self {
            width,
            height,
            stride: width + GAP,
        }
    }
}

/// Load state of one gallery item's image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageState {
    /// Not fetched yet; the card shows the transparent placeholder.
    #[default]
    Pending,
    /// Uploaded; native pixel size recorded for aspect correction.
    Ready {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
    },
    /// Fetch or decode failed; the card stays blank.
    Failed,
}

impl ImageState {
    /// Native pixel size, once ready.
    #[must_use]
    pub fn size(self) -> Option<(u32, u32)> {
        match self {
            Self::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

/// Per-frame inputs shared by every card.
#[derive(Clone, Copy, Debug)]
pub struct FrameLayout {
    /// Card sizing.
    pub metrics: CardMetrics,
    /// Half the viewport width.
    pub half_width: f64,
    /// Signed curvature.
    pub bend: f64,
    /// Length of the full duplicated strip, `slots × stride`.
    pub total_width: f64,
}

/// One render slot.
#[derive(Clone, Debug)]
pub struct Card {
    /// Position in the duplicated strip.
    pub render_index: usize,
    /// Index of the gallery item shown.
    pub logical_index: usize,
    /// Scene node carrying the placement.
    pub node: NodeId,
    /// Texture of the gallery item.
    pub texture: TextureId,
    slot_x: f64,
    /// Accumulated wrap offset.
    pub extra: f64,
    /// Center X relative to the viewport center, as of the last update.
    pub x: f64,
    /// Arc displacement.
    pub y: f64,
    /// Arc rotation.
    pub rotation: f64,
    /// Displayed scale, eased toward the layout target.
    pub scale: f64,
    /// Opacity from the distance table.
    pub alpha: f32,
    /// Shader time.
    pub time: f64,
    /// Scroll velocity this frame, drives the ripple.
    pub speed: f64,
}

impl Card {
    /// Creates a card for `render_index`, showing `logical_index`.
    #[must_use]
    pub fn new(render_index: usize, logical_index: usize, node: NodeId, texture: TextureId) -> Self {
        Self {
            render_index,
            logical_index,
            node,
            texture,
            slot_x: 0.0,
            extra: 0.0,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: layout::BASE_SCALE,
            alpha: 1.0,
            // Staggered so neighbouring cards do not ripple in phase.
            time: (render_index as f64 * 37.0) % 100.0,
            speed: 0.0,
        }
    }

    /// Base X of this slot before scrolling and wrapping.
    #[must_use]
    pub fn slot_x(&self) -> f64 {
        self.slot_x
    }

    /// Recomputes the slot position for new metrics.
    ///
    /// The accumulated wrap offset is a whole number of old strip lengths;
    /// it is rescaled so it stays a whole number of new ones.
    pub fn on_resize(&mut self, metrics: &CardMetrics, previous_stride: Option<f64>) {
        if let Some(prev) = previous_stride
            && prev > 0.0
        {
            self.extra *= metrics.stride / prev;
        }
        self.slot_x = self.render_index as f64 * metrics.stride;
    }

    /// Moves the card by whole strip lengths so it lies within half a strip
    /// of the viewport center.
    ///
    /// The per-card wrap only refills the leading edge, so after the
    /// viewport grows the trailing side may be short of cards until this
    /// spreads them evenly again.
    pub fn recenter(&mut self, current: f64, total_width: f64) {
        if !total_width.is_finite() || total_width <= 0.0 {
            return;
        }
        let x = self.slot_x - current - self.extra;
        let laps = ((x + total_width / 2.0) / total_width).floor();
        if laps.is_finite() {
            self.extra += laps * total_width;
        }
        self.x = self.slot_x - current - self.extra;
    }

    /// Advances the card one frame.
    pub fn update(&mut self, scroll: &ScrollState, direction: Direction, frame: &FrameLayout) {
        let m = &frame.metrics;
        self.x = self.slot_x - scroll.current - self.extra;

        let placement = layout::arc_placement(self.x, frame.half_width, frame.bend);
        self.y = placement.y;
        self.rotation = placement.rotation;

        let target = layout::target_scale(self.x, m.stride);
        self.scale = layout::ease_toward(self.scale, target, SCALE_LERP);

        self.alpha = if m.stride > 0.0 {
            layout::alpha_for_distance(self.x / m.stride)
        } else {
            1.0
        };

        self.time += TIME_STEP;
        self.speed = scroll.speed();

        let plane_offset = m.width * self.scale / 2.0;
        let is_before = self.x + plane_offset < -frame.half_width;
        let is_after = self.x - plane_offset > frame.half_width;
        match direction {
            Direction::Forward if is_before => {
                self.extra -= frame.total_width;
                self.x += frame.total_width;
            }
            Direction::Backward if is_after => {
                self.extra += frame.total_width;
                self.x -= frame.total_width;
            }
            _ => {}
        }
    }

    /// Shifts the wrap offset to compensate for a scroll rebase of
    /// `scroll_delta`, leaving the on-screen position unchanged.
    pub fn rebase(&mut self, scroll_delta: f64) {
        self.extra -= scroll_delta;
    }

    /// Transform of the card relative to the strip node.
    ///
    /// The strip node carries `-current`, so the world X comes out as
    /// [`x`](Self::x). The mesh is a unit quad centered on the origin.
    #[must_use]
    pub fn local_transform(&self, metrics: &CardMetrics) -> Transform3d {
        Transform3d::from_translation(self.slot_x - self.extra, self.y, 0.0)
            * Transform3d::from_rotation_z(self.rotation)
            * Transform3d::from_scale(
                metrics.width * self.scale,
                metrics.height * self.scale,
                1.0,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    fn layout_for(n_slots: usize) -> FrameLayout {
        let metrics = CardMetrics {
            width: 4.0,
            height: 6.0,
            stride: 6.0,
        };
        FrameLayout {
            metrics,
            half_width: 10.0,
            bend: 0.0,
            total_width: n_slots as f64 * metrics.stride,
        }
    }

    fn card(render_index: usize) -> Card {
        let mut graph = SceneGraph::new();
        let node = graph.create_node();
        Card::new(render_index, render_index % 3, node, TextureId(0))
    }

    #[test]
    fn metrics_from_viewport() {
        let m = CardMetrics::for_viewport(Size::new(30.0, 10.0));
        assert!((m.height - 6.0).abs() < 1e-12);
        assert!((m.width - 4.0).abs() < 1e-12, "2:3 aspect");
        assert!((m.stride - 6.0).abs() < 1e-12, "width plus gap");
    }

    #[test]
    fn position_follows_scroll() {
        let frame = layout_for(12);
        let mut c = card(2);
        c.on_resize(&frame.metrics, None);
        assert_eq!(c.slot_x(), 12.0);

        let mut scroll = ScrollState::new(1.0);
        scroll.current = 5.0;
        c.update(&scroll, Direction::Forward, &frame);
        assert_eq!(c.x, 7.0);
        assert_eq!(c.alpha, 1.0, "7/6 strides away");
    }

    #[test]
    fn wraps_forward_off_the_left_edge() {
        let frame = layout_for(12);
        let mut c = card(0);
        c.on_resize(&frame.metrics, None);
        let mut scroll = ScrollState::new(1.0);
        scroll.current = 20.0;
        c.update(&scroll, Direction::Forward, &frame);
        assert_eq!(c.extra, -72.0);
        assert_eq!(c.x, 52.0);

        // Same position moving backward does not wrap.
        let mut c = card(0);
        c.on_resize(&frame.metrics, None);
        c.update(&scroll, Direction::Backward, &frame);
        assert_eq!(c.extra, 0.0);
    }

    #[test]
    fn wraps_backward_off_the_right_edge() {
        let frame = layout_for(12);
        let mut c = card(5);
        c.on_resize(&frame.metrics, None);
        let scroll = ScrollState::new(1.0);
        c.update(&scroll, Direction::Backward, &frame);
        assert_eq!(c.extra, 72.0);
        assert_eq!(c.x, 30.0 - 72.0);
    }

    #[test]
    fn center_band_is_one_stride_wide() {
        let frame = layout_for(12);
        let mut scroll = ScrollState::new(1.0);
        // Slots 0 and 1 land at -2.9 and 3.1: only the first is within half a
        // stride, though both are more than half a card width out.
        scroll.current = 2.9;
        let grown: Vec<bool> = (0..3)
            .map(|i| {
                let mut c = card(i);
                c.on_resize(&frame.metrics, None);
                c.update(&scroll, Direction::Forward, &frame);
                c.scale > layout::BASE_SCALE
            })
            .collect();
        assert_eq!(grown, [true, false, false]);
    }

    #[test]
    fn recenter_spreads_cards_around_the_center() {
        let frame = layout_for(12);
        let total = frame.total_width;
        let mut xs: Vec<f64> = (0..12)
            .map(|i| {
                let mut c = card(i);
                c.on_resize(&frame.metrics, None);
                c.recenter(6.0, total);
                assert_eq!(c.x, c.slot_x() - 6.0 - c.extra);
                assert!(c.x >= -total / 2.0 && c.x < total / 2.0, "{}", c.x);
                assert_eq!(c.extra % total, 0.0, "whole laps only");
                c.x
            })
            .collect();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs.first(), Some(&-36.0));
        assert_eq!(xs.last(), Some(&30.0));

        let mut c = card(3);
        c.on_resize(&frame.metrics, None);
        c.recenter(6.0, total);
        let extra = c.extra;
        c.recenter(6.0, total);
        assert_eq!(c.extra, extra, "idempotent");
    }

    #[test]
    fn time_and_speed_advance() {
        let frame = layout_for(12);
        let mut c = card(0);
        let t0 = c.time;
        let mut scroll = ScrollState::new(0.5);
        scroll.target = 2.0;
        scroll.advance();
        c.update(&scroll, Direction::Forward, &frame);
        assert!((c.time - t0 - TIME_STEP).abs() < 1e-12);
        assert_eq!(c.speed, 1.0);
    }

    #[test]
    fn rebase_keeps_screen_position() {
        let frame = layout_for(12);
        let mut c = card(7);
        c.on_resize(&frame.metrics, None);
        let mut scroll = ScrollState::new(1.0);
        scroll.current = 40.0;
        c.update(&scroll, Direction::Forward, &frame);
        let before = c.x;

        scroll.rebase(-72.0);
        c.rebase(-72.0);
        c.update(&scroll, Direction::Forward, &frame);
        assert!((c.x - before).abs() < 1e-9);
    }

    #[test]
    fn resize_rescales_wrap_offset() {
        let frame = layout_for(12);
        let mut c = card(1);
        c.on_resize(&frame.metrics, None);
        c.extra = -72.0;
        let bigger = CardMetrics {
            width: 10.0,
            height: 15.0,
            stride: 12.0,
        };
        c.on_resize(&bigger, Some(6.0));
        assert_eq!(c.extra, -144.0);
        assert_eq!(c.slot_x(), 12.0);
    }
}
