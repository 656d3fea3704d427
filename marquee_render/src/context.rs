// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPU device, surface and per-frame drawing.

use marquee_core::scene::TextureId;
use marquee_core::{Frame, Presenter};

use crate::card_pipeline::{CardPipeline, CardUniform};
use crate::error::RenderError;
use crate::plan::RenderPlan;
use crate::texture::{DecodedImage, TextureStore};

/// GPU state for one render slot.
#[derive(Debug)]
struct SlotBinding {
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Texture the bind group currently samples, `None` when stale.
    bound: Option<(TextureId, bool)>,
}

/// Draws carousel frames onto a `wgpu` surface.
///
/// Owns the device, the surface configuration, the card pipeline and every
/// card texture. Implements [`Presenter`], so a frame loop can hand it each
/// [`Frame`] from [`Carousel::tick`](marquee_core::Carousel::tick).
#[derive(Debug)]
pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    cards: CardPipeline,
    textures: TextureStore,
    slots: Vec<SlotBinding>,
    plan: RenderPlan,
}

impl RenderContext {
    /// Selects an adapter for `surface`, creates the device and configures
    /// the surface at `width × height` pixels.
    ///
    /// # Errors
    ///
    /// Fails if no adapter can present to the surface, the device cannot be
    /// created, or the surface has no usable configuration.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let info = adapter.get_info();
        log::info!("using adapter {:?} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("marquee"),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;
        // Cards are blended over the host page.
        let caps = surface.get_capabilities(&adapter);
        if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            config.alpha_mode = wgpu::CompositeAlphaMode::PreMultiplied;
        }
        surface.configure(&device, &config);

        let cards = CardPipeline::new(&device, config.format);
        let textures = TextureStore::new(&device, &queue);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            cards,
            textures,
            slots: Vec::new(),
            plan: RenderPlan::new(),
        })
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigures the surface. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Uploads the decoded image of gallery item `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ImageSize`] if the device cannot hold it.
    pub fn upload_image(&mut self, index: usize, image: &DecodedImage) -> Result<(), RenderError> {
        let id = TextureId(u32::try_from(index).unwrap_or(u32::MAX));
        self.textures
            .upload(&self.device, &self.queue, id, image)?;
        for slot in &mut self.slots {
            if slot.bound.is_some_and(|(bound, _)| bound == id) {
                slot.bound = None;
            }
        }
        Ok(())
    }

    /// Draws `frame`.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] for unrecoverable acquisition
    /// failures such as running out of memory.
    pub fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.plan.rebuild(frame);
        self.ensure_slots(frame.cards.len());

        for item in &self.plan.items {
            let Some(slot) = self.slots.get_mut(item.slot) else {
                continue;
            };
            let wanted = (item.texture, self.textures.contains(item.texture));
            if slot.bound != Some(wanted) {
                slot.bind_group =
                    self.cards
                        .bind(&self.device, &slot.uniform, self.textures.view(item.texture));
                slot.bound = Some(wanted);
            }
            self.queue
                .write_buffer(&slot.uniform, 0, bytemuck::bytes_of(&CardUniform::from(item)));
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring a frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("carousel encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("carousel pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.cards.pipeline);
            pass.set_vertex_buffer(0, self.cards.vertex_buffer.slice(..));
            pass.set_index_buffer(self.cards.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for item in &self.plan.items {
                let Some(slot) = self.slots.get(item.slot) else {
                    continue;
                };
                pass.set_bind_group(0, &slot.bind_group, &[]);
                pass.draw_indexed(0..self.cards.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Releases every texture. The device and surface are dropped with
    /// `self`.
    pub fn destroy(mut self) {
        self.textures.destroy();
        self.slots.clear();
        log::debug!("render context destroyed");
    }

    fn ensure_slots(&mut self, count: usize) {
        self.slots.truncate(count);
        while self.slots.len() < count {
            let uniform = self.cards.create_uniform(&self.device);
            let bind_group = self.cards.bind(
                &self.device,
                &uniform,
                self.textures.view(TextureId(0)),
            );
            self.slots.push(SlotBinding {
                uniform,
                bind_group,
                bound: None,
            });
        }
    }
}

impl Presenter for RenderContext {
    fn apply(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.render(frame) {
            log::warn!("failed to draw frame: {e}");
        }
    }
}
