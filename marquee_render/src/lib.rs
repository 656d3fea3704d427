// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `wgpu` renderer for marquee carousels.
//!
//! This crate turns the [`Frame`](marquee_core::Frame)s produced by
//! [`marquee_core`] into GPU draws. It provides:
//!
//! - [`RenderPlan`] - the ordered card draws for one frame, built on the CPU
//! - [`RenderContext`] - device, surface, pipeline and textures; implements
//!   [`Presenter`](marquee_core::Presenter)
//! - [`decode_image`] - PNG, JPEG and WebP decoding for card textures
//!
//! Each card is a subdivided unit plane drawn with one shader that ripples
//! the plane with scroll speed, crops the image to cover the card, masks
//! rounded corners and darkens the edges.

mod card_pipeline;
mod context;
mod error;
mod mesh;
mod plan;
mod texture;

pub use card_pipeline::{CARD_SHADER, CardUniform};
pub use context::RenderContext;
pub use error::RenderError;
pub use mesh::{CardVertex, HEIGHT_SEGMENTS, PlaneMesh, WIDTH_SEGMENTS};
pub use plan::{RenderItem, RenderPlan};
pub use texture::{DecodedImage, TEXTURE_FORMAT, TextureStore, decode_image};
