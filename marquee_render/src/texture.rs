// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card textures: one per gallery item, shared by all of its slots.

use marquee_core::scene::TextureId;

use crate::error::RenderError;

/// Texel format of every card texture.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// An image decoded to tightly packed RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// `width × height × 4` bytes, rows top to bottom.
    pub pixels: Vec<u8>,
}

/// Decodes PNG, JPEG or WebP bytes.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the format is unknown or the data is
/// corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, RenderError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// A texture and the view bound into card bind groups.
#[derive(Debug)]
struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl GpuTexture {
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Owns the placeholder and every uploaded card texture.
#[derive(Debug)]
pub struct TextureStore {
    placeholder: GpuTexture,
    textures: Vec<Option<GpuTexture>>,
    max_dimension: u32,
}

impl TextureStore {
    /// Creates the store and its 1×1 transparent placeholder.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            placeholder: GpuTexture::upload(device, queue, "card placeholder", 1, 1, &[0; 4]),
            textures: Vec::new(),
            max_dimension: device.limits().max_texture_dimension_2d,
        }
    }

    /// Uploads the image for `id`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ImageSize`] if the image is empty or exceeds
    /// the device limit; the card keeps showing the placeholder.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: TextureId,
        image: &DecodedImage,
    ) -> Result<(), RenderError> {
        let limit = self.max_dimension;
        if image.width == 0 || image.height == 0 || image.width > limit || image.height > limit {
            return Err(RenderError::ImageSize {
                width: image.width,
                height: image.height,
                limit,
            });
        }
        let slot = id.0 as usize;
        if self.textures.len() <= slot {
            self.textures.resize_with(slot + 1, || None);
        }
        if let Some(old) = self.textures[slot].take() {
            old.texture.destroy();
        }
        self.textures[slot] = Some(GpuTexture::upload(
            device,
            queue,
            "card image",
            image.width,
            image.height,
            &image.pixels,
        ));
        Ok(())
    }

    /// View for `id`, or the placeholder if it has not been uploaded.
    #[must_use]
    pub fn view(&self, id: TextureId) -> &wgpu::TextureView {
        self.textures
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .map_or(&self.placeholder.view, |t| &t.view)
    }

    /// Whether an image has been uploaded for `id`.
    #[must_use]
    pub fn contains(&self, id: TextureId) -> bool {
        matches!(self.textures.get(id.0 as usize), Some(Some(_)))
    }

    /// Releases every texture.
    pub fn destroy(&mut self) {
        for texture in self.textures.drain(..).flatten() {
            texture.texture.destroy();
        }
        self.placeholder.texture.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let decoded = decode_image(&png(3, 2)).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)), "{err}");
    }
}
