// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perspective camera and world-space viewport extents.

use kurbo::{Point, Size};

use crate::transform::Transform3d;

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f64 = 45.0;

/// Distance of the camera from the card plane along +Z.
pub const CAMERA_Z: f64 = 20.0;

const NEAR: f64 = 1.0;
const FAR: f64 = 100.0;

/// A fixed-FOV perspective camera on the Z axis looking at the origin.
///
/// [`resize`](Self::resize) recomputes the projection and the size of the
/// world-space rectangle visible at `z = 0`, which all card sizing derives
/// from.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    screen: Size,
    viewport: Option<Size>,
    view: Transform3d,
    projection: Transform3d,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera with no screen yet; frames are skipped until the
    /// first non-empty [`resize`](Self::resize).
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Size::ZERO,
            viewport: None,
            view: Transform3d::from_translation(0.0, 0.0, -CAMERA_Z),
            projection: Transform3d::IDENTITY,
        }
    }

    /// Updates the screen size in pixels.
    ///
    /// A zero-area (or non-finite) size leaves the viewport unavailable so
    /// callers skip rendering instead of dividing by zero. Returns whether a
    /// usable viewport is available afterward. Calling this twice with the
    /// same arguments yields identical state.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !usable {
            self.screen = Size::ZERO;
            self.viewport = None;
            return false;
        }
        let aspect = width / height;
        let fov = FOV_Y_DEGREES.to_radians();
        let vh = 2.0 * (fov / 2.0).tan() * CAMERA_Z;
        self.screen = Size::new(width, height);
        self.viewport = Some(Size::new(vh * aspect, vh));
        self.projection = Transform3d::perspective(fov, aspect, NEAR, FAR);
        true
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// World-space size of the visible rectangle at `z = 0`, if the screen
    /// has non-zero area.
    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Combined projection and view matrix.
    #[must_use]
    pub fn view_projection(&self) -> Transform3d {
        self.projection * self.view
    }

    /// Projects a world-space point to pixel coordinates (origin top-left).
    ///
    /// Returns `None` without a viewport or for points behind the camera.
    #[must_use]
    pub fn world_to_screen(&self, p: [f64; 3]) -> Option<Point> {
        self.viewport?;
        let clip = self.view_projection().transform_point(p);
        if clip[3] <= 0.0 {
            return None;
        }
        let ndc_x = clip[0] / clip[3];
        let ndc_y = clip[1] / clip[3];
        Some(Point::new(
            (ndc_x + 1.0) * 0.5 * self.screen.width,
            (1.0 - ndc_y) * 0.5 * self.screen.height,
        ))
    }
}
