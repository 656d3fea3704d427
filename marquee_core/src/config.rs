// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration.
//!
//! [`CarouselOptions`] is the shape hosts pass in (JSON on the web):
//!
//! ```json
//! { "items": [{ "image": "a.jpg", "text": "A" }], "bend": 3, "scrollEase": 0.05 }
//! ```
//!
//! Every option except `items` has a default matching the storefront's hero
//! banner, see [`CarouselConfig::hero`].

use serde::Deserialize;

use crate::error::ConfigError;
use crate::time::Duration;

/// One host-supplied gallery entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GalleryItem {
    /// Image URI (or path, for native hosts).
    pub image: String,
    /// Caption shown under the card.
    #[serde(alias = "text", default)]
    pub label: String,
}

impl GalleryItem {
    /// Creates an item.
    #[must_use]
    pub fn new(image: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            label: label.into(),
        }
    }
}

/// Timer periods, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingConfig {
    /// Period of the autoplay advance.
    pub autoplay_interval_ms: u64,
    /// Length of one autoplay tween.
    pub autoplay_tween_ms: u64,
    /// Period of the center-tracking loop.
    pub tracking_interval_ms: u64,
    /// Quiet period after the last wheel event before snapping.
    pub wheel_settle_ms: u64,
    /// Emphasis pause after the centered item changes.
    pub dwell_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 5_000,
            autoplay_tween_ms: 800,
            tracking_interval_ms: 100,
            wheel_settle_ms: 200,
            dwell_ms: 2_000,
        }
    }
}

impl TimingConfig {
    /// Autoplay period as a [`Duration`].
    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Autoplay tween length as a [`Duration`].
    #[must_use]
    pub const fn autoplay_tween(&self) -> Duration {
        Duration::from_millis(self.autoplay_tween_ms)
    }

    /// Tracking period as a [`Duration`].
    #[must_use]
    pub const fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }

    /// Wheel settle delay as a [`Duration`].
    #[must_use]
    pub const fn wheel_settle(&self) -> Duration {
        Duration::from_millis(self.wheel_settle_ms)
    }

    /// Dwell length as a [`Duration`].
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

/// Visual and interaction parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Signed arc curvature; `0` is flat.
    pub bend: f64,
    /// CSS color of the captions.
    pub text_color: String,
    /// Corner radius of the card mask, in UV units.
    pub border_radius: f32,
    /// CSS font of the captions.
    pub font: String,
    /// Multiplier for drag and wheel sensitivity.
    pub scroll_speed: f64,
    /// Per-frame fraction of the remaining distance the scroll covers.
    pub scroll_ease: f64,
    /// Whether the carousel advances on its own.
    pub autoplay: bool,
    /// Timer periods.
    pub timing: TimingConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::hero()
    }
}

impl CarouselConfig {
    /// Hero-banner defaults.
    #[must_use]
    pub fn hero() -> Self {
        Self {
            bend: 3.0,
            text_color: String::from("#ffffff"),
            border_radius: 0.05,
            font: String::from("bold 30px Figtree"),
            scroll_speed: 2.0,
            scroll_ease: 0.05,
            autoplay: true,
            timing: TimingConfig::default(),
        }
    }

    /// Checks every numeric range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scroll_ease > 0.0 && self.scroll_ease <= 1.0) {
            return Err(ConfigError::ScrollEase(self.scroll_ease));
        }
        if !(0.0..=0.5).contains(&self.border_radius) {
            return Err(ConfigError::BorderRadius(self.border_radius));
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(ConfigError::ScrollSpeed(self.scroll_speed));
        }
        if !self.bend.is_finite() {
            return Err(ConfigError::Bend(self.bend));
        }
        let t = &self.timing;
        for (name, ms) in [
            ("autoplayInterval", t.autoplay_interval_ms),
            ("autoplayTween", t.autoplay_tween_ms),
            ("trackingInterval", t.tracking_interval_ms),
            ("wheelSettle", t.wheel_settle_ms),
            ("dwell", t.dwell_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroPeriod(name));
            }
        }
        Ok(())
    }
}

/// Everything a host passes to construct a carousel.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CarouselOptions {
    /// Gallery entries; may be empty.
    #[serde(default)]
    pub items: Vec<GalleryItem>,
    /// Remaining options.
    #[serde(flatten)]
    pub config: CarouselConfig,
}
