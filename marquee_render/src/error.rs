// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors from GPU setup, frame acquisition and image decoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No adapter can present to the surface.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// The adapter refused to create a device.
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The platform refused to create a surface.
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    /// The surface has no configuration compatible with the adapter.
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
    /// Acquiring a frame failed in a way reconfiguring cannot fix.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// The decoded image is empty or exceeds the device's texture size limit.
    #[error("unsupported image size {width}x{height} (limit {limit}px)")]
    ImageSize {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
        /// Maximum 2D texture dimension of the device.
        limit: u32,
    },
}
