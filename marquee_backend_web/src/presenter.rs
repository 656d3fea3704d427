// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card captions as DOM elements.
//!
//! Translates the scene graph of a [`Frame`] into one positioned `<div>` per
//! card node by applying the incremental updates in its
//! [`FrameChanges`](marquee_core::scene::FrameChanges). The captions sit in
//! an overlay above the canvas, anchored under the bottom edge of each card.

use std::fmt;

use kurbo::Point;
use marquee_core::camera::Camera;
use marquee_core::transform::Transform3d;
use marquee_core::{Frame, Presenter};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

/// Gap between a card's bottom edge and its caption, in pixels.
const CAPTION_GAP: f64 = 12.0;

/// Maps card nodes to caption elements inside an overlay.
///
/// Elements are indexed by scene slot, like the scene's own columns. Call
/// [`apply`](Presenter::apply) every frame; only slots listed in the frame's
/// changes are touched.
pub struct LabelPresenter {
    document: Document,
    overlay: HtmlElement,
    elements: Vec<Option<HtmlElement>>,
    /// Slot currently marked `data-centered`.
    centered: Option<u32>,
}

impl fmt::Debug for LabelPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelPresenter")
            .field("overlay", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .field("centered", &self.centered)
            .finish_non_exhaustive()
    }
}

impl LabelPresenter {
    /// Creates an overlay inside `container` for captions drawn with `font`
    /// and `color`.
    ///
    /// # Errors
    ///
    /// Propagates DOM exceptions from creating or inserting the overlay.
    pub fn new(
        document: &Document,
        container: &HtmlElement,
        font: &str,
        color: &str,
    ) -> Result<Self, JsValue> {
        let overlay: HtmlElement = document.create_element("div")?.unchecked_into();
        let s = overlay.style();
        s.set_property("position", "absolute")?;
        s.set_property("inset", "0")?;
        s.set_property("overflow", "hidden")?;
        s.set_property("pointer-events", "none")?;
        s.set_property("font", font)?;
        s.set_property("color", color)?;
        container.append_child(&overlay)?;
        Ok(Self {
            document: document.clone(),
            overlay,
            elements: Vec::new(),
            centered: None,
        })
    }

    /// Number of live caption elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.iter().flatten().count()
    }

    /// Whether no caption element exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element holding the captions.
    #[must_use]
    pub fn overlay(&self) -> &HtmlElement {
        &self.overlay
    }

    /// Removes the overlay and every caption.
    pub fn remove(&mut self) {
        self.elements.clear();
        self.centered = None;
        self.overlay.remove();
    }

    fn get_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.elements
            .get(idx as usize)
            .and_then(|slot| slot.as_ref())
    }

    fn take_element(&mut self, idx: u32) -> Option<HtmlElement> {
        self.elements.get_mut(idx as usize)?.take()
    }

    fn put_element(&mut self, idx: u32, el: HtmlElement) {
        let slot = idx as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(el);
    }

    fn create_caption(&self, text: &str) -> Option<HtmlElement> {
        let el: HtmlElement = self.document.create_element("div").ok()?.unchecked_into();
        let s = el.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("top", "0");
        let _ = s.set_property("white-space", "nowrap");
        let _ = s.set_property("will-change", "transform, opacity");
        el.set_text_content(Some(text));
        self.overlay.append_child(&el).ok()?;
        Some(el)
    }

    fn set_centered(&mut self, idx: Option<u32>) {
        if idx == self.centered {
            return;
        }
        if let Some(el) = self.centered.and_then(|old| self.get_element(old)) {
            let _ = el.remove_attribute("data-centered");
        }
        if let Some(el) = idx.and_then(|new| self.get_element(new)) {
            let _ = el.set_attribute("data-centered", "");
        }
        self.centered = idx;
    }
}

impl Presenter for LabelPresenter {
    fn apply(&mut self, frame: &Frame<'_>) {
        let changes = frame.changes;
        let scene = frame.scene;

        for &idx in &changes.removed {
            if let Some(el) = self.take_element(idx) {
                el.remove();
            }
            if self.centered == Some(idx) {
                self.centered = None;
            }
        }

        for &idx in &changes.added {
            // Only card nodes carry content; the strip node has no caption.
            let Some(texture) = scene.content_at(idx) else {
                continue;
            };
            let text = frame
                .items
                .get(texture.0 as usize)
                .map_or("", |item| item.label.as_str());
            if let Some(el) = self.create_caption(text) {
                self.put_element(idx, el);
            }
        }

        for &idx in &changes.transforms {
            if let Some(el) = self.get_element(idx) {
                let css = label_anchor(frame.camera, &scene.world_transform_at(idx))
                    .map(caption_transform);
                let s = el.style();
                match css {
                    Some(css) => {
                        let _ = s.set_property("transform", &css);
                        let _ = s.remove_property("display");
                    }
                    None => {
                        let _ = s.set_property("display", "none");
                    }
                }
            }
        }

        for &idx in &changes.opacities {
            if let Some(el) = self.get_element(idx) {
                let opacity = scene.effective_opacity_at(idx);
                let _ = el.style().set_property("opacity", &format!("{opacity}"));
            }
        }

        let centered = frame
            .emphasized
            .then(|| {
                frame
                    .cards
                    .iter()
                    .min_by(|a, b| a.x.abs().total_cmp(&b.x.abs()))
                    .map(|card| card.node.index())
            })
            .flatten();
        self.set_centered(centered);
    }
}

/// Screen position of the bottom center of a card placed by `world`.
///
/// Returns `None` when the camera has no viewport or the point is behind it.
#[must_use]
pub fn label_anchor(camera: &Camera, world: &Transform3d) -> Option<Point> {
    let [x, y, z, w] = world.transform_point([0.0, -0.5, 0.0]);
    if w == 0.0 {
        return None;
    }
    camera.world_to_screen([x / w, y / w, z / w])
}

/// CSS transform that centers a caption horizontally under `anchor`.
#[must_use]
pub fn caption_transform(anchor: Point) -> String {
    format!(
        "translate({}px, {}px) translate(-50%, 0)",
        anchor.x,
        anchor.y + CAPTION_GAP
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_sits_below_centered_card() {
        let mut camera = Camera::new();
        camera.resize(800.0, 600.0);
        let world = Transform3d::from_scale(4.0, 6.0, 1.0);
        let p = label_anchor(&camera, &world).unwrap();
        assert!((p.x - 400.0).abs() < 1e-6, "x = {}", p.x);
        assert!(p.y > 300.0, "bottom edge is below the screen center");
    }

    #[test]
    fn anchor_without_viewport_is_none() {
        let camera = Camera::new();
        assert!(label_anchor(&camera, &Transform3d::IDENTITY).is_none());
    }

    #[test]
    fn caption_transform_offsets_by_gap() {
        let css = caption_transform(Point::new(10.0, 20.0));
        assert_eq!(css, "translate(10px, 32px) translate(-50%, 0)");
    }
}
