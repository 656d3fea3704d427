// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph, layout and interaction state for an infinite image carousel.
//!
//! `marquee_core` is platform-independent: it never touches a GPU, a DOM or a
//! clock. Backends feed it frame ticks, pixel sizes and input events; it
//! hands back evaluated frames for presenters to draw.
//!
//! # Architecture
//!
//! ```text
//!   Backend (tick source, input)
//!       │                   │
//!       ▼                   ▼
//!   FrameTick        pointer / wheel ──► ScrollState.target
//!       │
//!       ▼
//!   Carousel::tick()
//!       ├── TimerSet::poll() ──► autoplay, tracking + wrap-rebase, dwell
//!       ├── ScrollState::advance()
//!       ├── Card::update() ──► SceneGraph::set_transform / set_opacity
//!       └── SceneGraph::evaluate() ──► FrameChanges
//!                                          │
//!                  ┌───────────────────────┘
//!                  ▼
//!   Frame ──► Presenter::apply()   (wgpu renderer, DOM captions)
//! ```
//!
//! **[`engine`]** - The [`Carousel`] that owns and sequences everything.
//!
//! **[`scene`]** - Struct-of-arrays node tree with index handles. The strip
//! node carries the scroll offset; each card node carries its curve
//! placement and binds its item's texture.
//!
//! **[`dirty`]** - Dirty channels via `understory_dirty`. A carousel at rest
//! produces empty [`FrameChanges`](scene::FrameChanges).
//!
//! **[`card`]**, **[`layout`]** - Render slots and the curvature solver
//! that places them on an arc.
//!
//! **[`input`]**, **[`autoplay`]**, **[`resolver`]** - The interaction
//! state machine, timed auto-advance, and center-index resolution with
//! seamless wrap.
//!
//! **[`timer`]**, **[`time`]**, **[`timing`]** - Host time in microsecond
//! ticks and the keyed timers polled each frame.
//!
//! **[`camera`]**, **[`transform`]** - Perspective camera and the 3D
//! transform type.
//!
//! **[`config`]**, **[`error`]** - Serde-loadable options and their
//! validation errors.
//!
//! **[`backend`]** - The [`Presenter`](backend::Presenter) trait that
//! renderers implement.

pub mod autoplay;
pub mod backend;
pub mod camera;
pub mod card;
pub mod config;
pub mod dirty;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod resolver;
pub mod scene;
pub mod scroll;
pub mod time;
pub mod timer;
pub mod timing;
pub mod transform;

pub use backend::{Frame, Presenter};
pub use config::{CarouselConfig, CarouselOptions, GalleryItem, TimingConfig};
pub use engine::Carousel;
pub use error::ConfigError;
