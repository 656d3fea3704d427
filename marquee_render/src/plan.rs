// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the card draws for one frame, in order.

use marquee_core::Frame;
use marquee_core::scene::TextureId;

/// A single card draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    /// Render slot, selects the per-slot uniform buffer.
    pub slot: usize,
    /// Texture of the card's gallery item.
    pub texture: TextureId,
    /// Clip-from-local matrix (column-major).
    pub mvp: [[f32; 4]; 4],
    /// Displayed plane size in world units.
    pub plane_size: [f32; 2],
    /// Image size used for cover cropping. Equal to `plane_size` while the
    /// image is not loaded, so the placeholder is not cropped.
    pub image_size: [f32; 2],
    /// Effective opacity.
    pub alpha: f32,
    /// Ripple time.
    pub time: f32,
    /// Ripple speed.
    pub speed: f32,
    /// Corner radius in UV units.
    pub border_radius: f32,
    /// Distance from the viewport center, the sort key.
    pub(crate) distance: f64,
}

/// The ordered draws for one frame.
///
/// Items are sorted back to front by distance from the viewport center, so
/// the emphasized card is drawn over its neighbours.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Rebuilds the plan from an evaluated frame.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "GPU uniforms are f32; card values are small"
    )]
    pub fn rebuild(&mut self, frame: &Frame<'_>) {
        self.clear();
        let view_projection = frame.camera.view_projection();
        let metrics = frame.metrics;

        for card in frame.cards_in_draw_order() {
            let alpha = frame.scene.effective_opacity(card.node);
            if alpha <= 0.0 {
                continue;
            }
            let mvp = view_projection * frame.scene.world_transform(card.node);
            if !mvp.is_finite() {
                continue;
            }
            let plane_size = [
                (metrics.width * card.scale) as f32,
                (metrics.height * card.scale) as f32,
            ];
            let image = frame
                .images
                .get(card.logical_index)
                .copied()
                .unwrap_or_default();
            let image_size = image
                .size()
                .filter(|&(w, h)| w > 0 && h > 0)
                .map_or(plane_size, |(w, h)| [w as f32, h as f32]);

            self.items.push(RenderItem {
                slot: card.render_index,
                texture: card.texture,
                mvp: mvp.to_cols_f32(),
                plane_size,
                image_size,
                alpha,
                time: card.time as f32,
                speed: card.speed as f32,
                border_radius: frame.border_radius,
                distance: card.x.abs(),
            });
        }
        self.items
            .sort_by(|a, b| b.distance.total_cmp(&a.distance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::time::HostTime;
    use marquee_core::timing::FrameTick;
    use marquee_core::{Carousel, CarouselConfig, GalleryItem};

    fn carousel(n: usize) -> Carousel {
        let items = (0..n)
            .map(|i| GalleryItem::new(format!("{i}.png"), ""))
            .collect();
        let mut c = Carousel::new(items, CarouselConfig::hero(), |_| {}).unwrap();
        c.resize(1280.0, 720.0);
        c
    }

    #[test]
    fn one_item_per_card_centered_last() {
        let mut c = carousel(5);
        let frame = c.tick(FrameTick::new(HostTime(0), 0)).unwrap();
        let mut plan = RenderPlan::new();
        plan.rebuild(&frame);

        assert_eq!(plan.items.len(), frame.cards.len());
        let last = plan.items.last().unwrap();
        let centered = frame
            .cards
            .iter()
            .find(|card| card.render_index == last.slot)
            .unwrap();
        assert!(centered.x.abs() < 1e-9, "centered card drawn on top");
        assert!(plan.items.iter().all(|item| item.alpha > 0.0));
    }

    #[test]
    fn pending_images_are_not_cropped() {
        let mut c = carousel(3);
        c.image_loaded(1, 400, 300);
        let frame = c.tick(FrameTick::new(HostTime(0), 0)).unwrap();
        let mut plan = RenderPlan::new();
        plan.rebuild(&frame);

        for item in &plan.items {
            if item.texture == TextureId(1) {
                assert_eq!(item.image_size, [400.0, 300.0]);
            } else {
                assert_eq!(item.image_size, item.plane_size);
            }
        }
    }

    #[test]
    fn rebuild_replaces_previous_items() {
        let mut c = carousel(4);
        let mut plan = RenderPlan::new();
        let frame = c.tick(FrameTick::new(HostTime(0), 0)).unwrap();
        plan.rebuild(&frame);
        let count = plan.items.len();
        let frame = c.tick(FrameTick::new(HostTime(16_000), 1)).unwrap();
        plan.rebuild(&frame);
        assert_eq!(plan.items.len(), count);
    }
}
