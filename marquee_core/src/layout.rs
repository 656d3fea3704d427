// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curvature solver.
//!
//! Cards are laid on a circular arc through the viewport center whose sagitta
//! at the viewport edge equals `|bend|`. Positive bend lifts the edges, so
//! the strip curves away from the viewer; negative bend curves it toward the
//! viewer.

/// Scale of the card nearest the center.
pub const CENTER_SCALE: f64 = 1.5;

/// Scale of every other card.
pub const BASE_SCALE: f64 = 1.0;

/// Per-frame exponential approach factor for the displayed scale.
pub const SCALE_LERP: f64 = 0.12;

/// Vertical offset and Z rotation of a card on the arc.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArcPlacement {
    /// Vertical displacement in world units.
    pub y: f64,
    /// Rotation about Z in radians.
    pub rotation: f64,
}

/// Places a card with world-space center `x` on the arc.
///
/// `half_width` is half the viewport width. `|x|` is clamped to it so cards
/// past the edge keep the edge pose instead of producing `NaN`.
#[must_use]
pub fn arc_placement(x: f64, half_width: f64, bend: f64) -> ArcPlacement {
    if bend == 0.0 || !bend.is_finite() || half_width <= 0.0 {
        return ArcPlacement::default();
    }
    let b = bend.abs();
    let h = half_width;
    let radius = (h * h + b * b) / (2.0 * b);
    let e = x.abs().min(h);
    let arc = radius - (radius * radius - e * e).sqrt();
    let angle = (e / radius).asin();
    let side = if x == 0.0 { 0.0 } else { x.signum() };
    ArcPlacement {
        y: bend.signum() * arc,
        rotation: bend.signum() * side * angle,
    }
}

/// Opacity for a card `distance` strides away from the center.
#[must_use]
pub fn alpha_for_distance(distance: f64) -> f32 {
    let d = distance.abs();
    if d <= 1.5 {
        1.0
    } else if d <= 2.5 {
        0.8
    } else if d <= 3.5 {
        0.5
    } else {
        0.2
    }
}

/// Scale a card eases toward when its center is at `x`.
///
/// The center band is one `stride` wide, so at most one card targets
/// [`CENTER_SCALE`] at a time and the band has no dead zone between cards.
#[must_use]
pub fn target_scale(x: f64, stride: f64) -> f64 {
    if x.abs() < stride / 2.0 {
        CENTER_SCALE
    } else {
        BASE_SCALE
    }
}

/// One frame of exponential approach from `current` toward `target`.
#[inline]
#[must_use]
pub fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn flat_when_bend_is_zero() {
        assert_eq!(arc_placement(7.0, 10.0, 0.0), ArcPlacement::default());
    }

    #[test]
    fn center_card_sits_on_axis() {
        let p = arc_placement(0.0, 10.0, 3.0);
        assert!(p.y.abs() < EPS);
        assert!(p.rotation.abs() < EPS);
    }

    #[test]
    fn edge_sagitta_equals_bend() {
        // At x = H the arc height is exactly B.
        let p = arc_placement(10.0, 10.0, 3.0);
        assert!((p.y - 3.0).abs() < 1e-9, "got {}", p.y);
        let n = arc_placement(10.0, 10.0, -3.0);
        assert!((n.y + 3.0).abs() < 1e-9, "negative bend mirrors, got {}", n.y);
    }

    #[test]
    fn rotation_is_antisymmetric_in_x() {
        let l = arc_placement(-4.0, 10.0, 2.0);
        let r = arc_placement(4.0, 10.0, 2.0);
        assert!((l.rotation + r.rotation).abs() < EPS);
        assert!((l.y - r.y).abs() < EPS, "height is symmetric");
        assert!(r.rotation > 0.0, "positive bend, positive x rotates positive");
    }

    #[test]
    fn beyond_edge_is_clamped_not_nan() {
        let far = arc_placement(1.0e6, 10.0, 2.0);
        let edge = arc_placement(10.0, 10.0, 2.0);
        assert!(far.y.is_finite() && far.rotation.is_finite());
        assert_eq!(far, edge);
    }

    #[test]
    fn zero_viewport_is_flat() {
        assert_eq!(arc_placement(1.0, 0.0, 2.0), ArcPlacement::default());
    }

    #[test]
    fn alpha_table() {
        assert_eq!(alpha_for_distance(0.0), 1.0);
        assert_eq!(alpha_for_distance(0.5), 1.0);
        assert_eq!(alpha_for_distance(1.5), 1.0);
        assert_eq!(alpha_for_distance(2.0), 0.8);
        assert_eq!(alpha_for_distance(-2.5), 0.8);
        assert_eq!(alpha_for_distance(3.0), 0.5);
        assert_eq!(alpha_for_distance(3.6), 0.2);
    }

    #[test]
    fn scale_targets_and_easing() {
        assert_eq!(target_scale(0.5, 4.0), CENTER_SCALE);
        assert_eq!(target_scale(2.0, 4.0), BASE_SCALE);

        let mut s = BASE_SCALE;
        s = ease_toward(s, CENTER_SCALE, SCALE_LERP);
        assert!(s > BASE_SCALE && s < CENTER_SCALE, "never snaps");
        assert!((s - 1.06).abs() < 1e-12);
    }
}
