// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// A rejected carousel configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `scrollEase` must lie in `(0, 1]`.
    #[error("scroll ease must be in (0, 1], got {0}")]
    ScrollEase(f64),
    /// `borderRadius` must lie in `[0, 0.5]`.
    #[error("border radius must be in [0, 0.5], got {0}")]
    BorderRadius(f32),
    /// `scrollSpeed` must be finite and non-negative.
    #[error("scroll speed must be finite and non-negative, got {0}")]
    ScrollSpeed(f64),
    /// `bend` must be finite.
    #[error("bend must be finite, got {0}")]
    Bend(f64),
    /// A timer period of zero would spin forever.
    #[error("timer `{0}` must have a non-zero period")]
    ZeroPeriod(&'static str),
}
