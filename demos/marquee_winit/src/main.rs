// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Desktop demo: an infinite curved carousel of local images.
//!
//! Drag with the left mouse button or use the wheel; the carousel advances
//! on its own otherwise. The centered item is logged as it changes.
//!
//! Run with: `cargo run -p marquee_winit -- photos/*.jpg`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use marquee_core::time::HostTime;
use marquee_core::timing::FrameTick;
use marquee_core::{Carousel, CarouselConfig, GalleryItem, Presenter as _};
use marquee_render::{DecodedImage, RenderContext, decode_image};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

/// Pixels scrolled per wheel line, matching a browser's line-mode deltas.
const LINE_HEIGHT: f64 = 40.0;

#[derive(Parser, Debug)]
#[command(about = "Infinite curved image carousel")]
struct Args {
    /// Images to show, in order.
    #[arg(required = true)]
    images: Vec<PathBuf>,
    /// Arc curvature; 0 is flat, negative bends the other way.
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    bend: f64,
    /// Fraction of the remaining scroll distance covered per frame.
    #[arg(long, default_value_t = 0.05)]
    ease: f64,
    /// Keep the carousel still until it is dragged.
    #[arg(long)]
    no_autoplay: bool,
}

impl Args {
    fn config(&self) -> CarouselConfig {
        CarouselConfig {
            bend: self.bend,
            scroll_ease: self.ease,
            autoplay: !self.no_autoplay,
            ..CarouselConfig::hero()
        }
    }

    fn items(&self) -> Vec<GalleryItem> {
        self.images
            .iter()
            .map(|path| {
                let label = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                GalleryItem::new(path.display().to_string(), label)
            })
            .collect()
    }
}

#[derive(Debug)]
enum UserEvent {
    ImageLoaded {
        index: usize,
        result: Result<DecodedImage, String>,
    },
}

struct App {
    paths: Vec<PathBuf>,
    proxy: EventLoopProxy<UserEvent>,
    start: Instant,
    frame_index: u64,
    carousel: Carousel,
    window: Option<Arc<Window>>,
    renderer: Option<RenderContext>,
    cursor_x: f64,
}

impl App {
    fn now(&self) -> HostTime {
        HostTime(u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX))
    }

    fn spawn_loads(&self) {
        for (index, path) in self.paths.iter().cloned().enumerate() {
            let proxy = self.proxy.clone();
            std::thread::spawn(move || {
                let result = std::fs::read(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| decode_image(&bytes).map_err(|e| e.to_string()))
                    .map_err(|e| format!("{}: {e}", path.display()));
                // The loop is gone if the window was closed first.
                let _ = proxy.send_event(UserEvent::ImageLoaded { index, result });
            });
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.carousel.destroy();
        if let Some(renderer) = self.renderer.take() {
            renderer.destroy();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("marquee")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let renderer = instance
            .create_surface(Arc::clone(&window))
            .map_err(Into::into)
            .and_then(|surface| {
                pollster::block_on(RenderContext::new(
                    &instance,
                    surface,
                    size.width,
                    size.height,
                ))
            });
        match renderer {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("could not initialize the renderer: {e}");
                event_loop.exit();
                return;
            }
        }

        self.carousel
            .resize(f64::from(size.width), f64::from(size.height));
        self.spawn_loads();
        window.request_redraw();
        self.window = Some(window);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::ImageLoaded { index, result } = event;
        let uploaded = result.and_then(|image| {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer
                    .upload_image(index, &image)
                    .map_err(|e| e.to_string())?;
            }
            Ok(image)
        });
        match uploaded {
            Ok(image) => self.carousel.image_loaded(index, image.width, image.height),
            Err(e) => {
                log::warn!("could not load image {index}: {e}");
                self.carousel.image_failed(index);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.carousel
                    .resize(f64::from(size.width), f64::from(size.height));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x;
                self.carousel.pointer_move(position.x);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.carousel.pointer_down(self.cursor_x),
                ElementState::Released => self.carousel.pointer_up(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // Positive means "scroll down", as in a DOM `WheelEvent`.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(p) => -p.y,
                };
                let now = self.now();
                self.carousel.wheel(delta_y, now);
            }
            WindowEvent::RedrawRequested => {
                let tick = FrameTick::new(self.now(), self.frame_index);
                self.frame_index += 1;
                if let Some(frame) = self.carousel.tick(tick)
                    && let Some(renderer) = self.renderer.as_mut()
                {
                    renderer.apply(&frame);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let carousel = Carousel::new(args.items(), args.config(), |index| {
        log::info!("centered item {index}");
    })?;

    let mut app = App {
        paths: args.images,
        proxy: event_loop.create_proxy(),
        start: Instant::now(),
        frame_index: 0,
        carousel,
        window: None,
        renderer: None,
        cursor_x: 0.0,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
