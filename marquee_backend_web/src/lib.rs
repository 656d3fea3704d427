// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for marquee carousels.
//!
//! This crate mounts a [`Carousel`] into a DOM element and drives it with
//! browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`LabelPresenter`]: card captions as positioned DOM elements
//! - [`Subscriptions`]: the mouse, touch, wheel and resize listeners
//! - [`create_carousel`]: the JavaScript entry point, returning a
//!   [`CarouselHandle`]
//!
//! Cards are drawn by [`marquee_render`] on a canvas filling the container,
//! through WebGPU when the browser has it and WebGL2 otherwise.
//!
//! ```js
//! const handle = await createCarousel(
//!   document.getElementById("hero"),
//!   JSON.stringify({ items: [{ image: "a.jpg", label: "A" }], bend: 1 }),
//!   (index) => console.log("active", index),
//! );
//! // later
//! handle.destroy();
//! ```

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "the GPU path is only compiled for wasm32")
)]

mod loader;
mod mount;
mod presenter;
mod raf;
mod subscriptions;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use marquee_core::time::HostTime;
use marquee_core::timing::FrameTick;
use marquee_core::{Carousel, CarouselOptions, Presenter as _};
use marquee_render::{RenderContext, RenderError};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, WheelEvent,
};

use mount::MountGuard;

pub use loader::LoadError;
pub use presenter::{LabelPresenter, caption_transform, label_anchor};
pub use raf::RafLoop;
pub use subscriptions::Subscriptions;

/// Returns the current host time from `performance.now()`, on the same
/// clock as the timestamps [`RafLoop`] delivers.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Everything one mounted carousel owns, shared by the frame loop, the
/// listeners and the image loaders.
pub(crate) struct State {
    pub(crate) carousel: Carousel,
    pub(crate) renderer: Option<RenderContext>,
    pub(crate) labels: LabelPresenter,
    pub(crate) container: HtmlElement,
    pub(crate) canvas: HtmlCanvasElement,
    /// Active-index changes reported during a tick, delivered once the
    /// state is no longer borrowed.
    pub(crate) notifications: Rc<RefCell<Vec<usize>>>,
    pub(crate) on_active_index_change: Option<js_sys::Function>,
}

struct Running {
    state: Rc<RefCell<State>>,
    raf: RafLoop,
    subscriptions: Subscriptions,
}

/// A mounted carousel, returned to JavaScript by [`create_carousel`].
#[wasm_bindgen]
pub struct CarouselHandle {
    running: Option<Running>,
}

impl fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("running", &self.running.is_some())
            .finish()
    }
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Gallery index of the centered card, if any.
    #[wasm_bindgen(getter, js_name = activeIndex)]
    pub fn active_index(&self) -> Option<u32> {
        let running = self.running.as_ref()?;
        let index = running.state.borrow().carousel.active_index()?;
        u32::try_from(index).ok()
    }

    /// Stops the frame loop, removes every listener, releases GPU resources
    /// and removes the canvas. Calling it again does nothing.
    pub fn destroy(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        running.raf.stop();
        let handlers = running.subscriptions.detach();

        {
            let mut s = running.state.borrow_mut();
            s.carousel.destroy();
            if let Some(renderer) = s.renderer.take() {
                renderer.destroy();
            }
            s.labels.remove();
            s.canvas.remove();
            s.notifications.borrow_mut().clear();
            s.on_active_index_change = None;
        }
        log::info!("carousel destroyed");

        // `destroy` may be running inside the frame callback or a listener;
        // their closures are dropped once the stack has unwound.
        wasm_bindgen_futures::spawn_local(async move {
            drop(handlers);
            drop(running);
        });
    }
}

/// Mounts a carousel into `container`.
///
/// `options_json` is a JSON [`CarouselOptions`] object: an `items` array of
/// `{ image, label }` plus any configuration fields to override. The
/// optional callback receives the gallery index of each newly centered card.
///
/// # Errors
///
/// The returned promise rejects if the options are malformed or invalid,
/// or no GPU adapter can draw to the canvas.
#[wasm_bindgen(js_name = createCarousel)]
pub async fn create_carousel(
    container: HtmlElement,
    options_json: String,
    on_active_index_change: Option<js_sys::Function>,
) -> Result<CarouselHandle, JsValue> {
    init_logging();

    let options = parse_options(&options_json).map_err(|e| js_error(&e))?;
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let s = canvas.style();
    s.set_property("position", "absolute")?;
    s.set_property("inset", "0")?;
    s.set_property("width", "100%")?;
    s.set_property("height", "100%")?;
    s.set_property("display", "block")?;
    s.set_property("touch-action", "pan-y")?;
    container.append_child(&canvas)?;
    let mut mounted = MountGuard::new();
    mounted.push(Element::from(canvas.clone()));

    let (width, height) = css_size(&container);
    let (pixel_width, pixel_height) = physical_size(width, height, device_pixel_ratio());
    canvas.set_width(pixel_width);
    canvas.set_height(pixel_height);

    let renderer = create_renderer(&canvas, pixel_width, pixel_height)
        .await
        .map_err(|e| js_error(&e))?;

    let notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notifications);
    let items = options.items.clone();
    let mut carousel = Carousel::new(options.items, options.config.clone(), move |index| {
        sink.borrow_mut().push(index);
    })
    .map_err(|e| js_error(&e))?;
    carousel.resize(width, height);

    let labels = LabelPresenter::new(
        &document,
        &container,
        &options.config.font,
        &options.config.text_color,
    )?;
    mounted.push(Element::from(labels.overlay().clone()));

    let state = Rc::new(RefCell::new(State {
        carousel,
        renderer: Some(renderer),
        labels,
        container: container.clone(),
        canvas,
        notifications,
        on_active_index_change,
    }));

    let subscriptions = subscribe(&state, &container)?;
    mounted.commit();
    log::info!(
        "carousel mounted with {} items at {width}×{height}",
        items.len()
    );
    loader::spawn_loads(&state, &items);

    let raf = RafLoop::new({
        let state = Rc::clone(&state);
        move |tick| on_frame(&state, tick)
    });
    raf.start();

    Ok(CarouselHandle {
        running: Some(Running {
            state,
            raf,
            subscriptions,
        }),
    })
}

fn on_frame(state: &Rc<RefCell<State>>, tick: FrameTick) {
    let (indices, callback) = {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        if let Some(frame) = s.carousel.tick(tick) {
            if let Some(renderer) = s.renderer.as_mut() {
                renderer.apply(&frame);
            }
            s.labels.apply(&frame);
        }
        let indices: Vec<usize> = s.notifications.borrow_mut().drain(..).collect();
        (indices, s.on_active_index_change.clone())
    };

    // The callback may call back into the handle, so nothing is borrowed.
    let Some(callback) = callback else {
        return;
    };
    for index in indices {
        let arg = JsValue::from(u32::try_from(index).unwrap_or(u32::MAX));
        if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
            log::warn!("onActiveIndexChange threw: {e:?}");
        }
    }
}

/// Wires input and resize events into the carousel.
fn subscribe(
    state: &Rc<RefCell<State>>,
    container: &HtmlElement,
) -> Result<Subscriptions, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut subs = Subscriptions::new();

    let st = Rc::clone(state);
    subs.listen(container, "mousedown", move |e: Event| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            st.borrow_mut().carousel.pointer_down(f64::from(e.client_x()));
        }
    })?;
    let st = Rc::clone(state);
    subs.listen(container, "touchstart", move |e: Event| {
        if let Some(x) = e.dyn_ref::<TouchEvent>().and_then(touch_x) {
            st.borrow_mut().carousel.pointer_down(x);
        }
    })?;

    // Moves and releases are tracked on the window so a drag that leaves
    // the container still ends.
    let st = Rc::clone(state);
    subs.listen(&window, "mousemove", move |e: Event| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            st.borrow_mut().carousel.pointer_move(f64::from(e.client_x()));
        }
    })?;
    let st = Rc::clone(state);
    subs.listen(&window, "touchmove", move |e: Event| {
        if let Some(x) = e.dyn_ref::<TouchEvent>().and_then(touch_x) {
            st.borrow_mut().carousel.pointer_move(x);
        }
    })?;
    for kind in ["mouseup", "touchend", "touchcancel"] {
        let st = Rc::clone(state);
        subs.listen(&window, kind, move |_| {
            st.borrow_mut().carousel.pointer_up();
        })?;
    }

    let st = Rc::clone(state);
    subs.listen(container, "wheel", move |e: Event| {
        if let Some(e) = e.dyn_ref::<WheelEvent>() {
            st.borrow_mut().carousel.wheel(e.delta_y(), now());
        }
    })?;

    let st = Rc::clone(state);
    subs.listen(&window, "resize", move |_| sync_size(&st))?;

    log::debug!("attached {} listeners", subs.len());
    Ok(subs)
}

fn sync_size(state: &Rc<RefCell<State>>) {
    let mut guard = state.borrow_mut();
    let s = &mut *guard;
    let (width, height) = css_size(&s.container);
    let (pixel_width, pixel_height) = physical_size(width, height, device_pixel_ratio());
    s.canvas.set_width(pixel_width);
    s.canvas.set_height(pixel_height);
    if let Some(renderer) = s.renderer.as_mut() {
        renderer.resize(pixel_width, pixel_height);
    }
    s.carousel.resize(width, height);
}

fn touch_x(e: &TouchEvent) -> Option<f64> {
    e.touches().get(0).map(|t| f64::from(t.client_x()))
}

fn css_size(el: &HtmlElement) -> (f64, f64) {
    (f64::from(el.client_width()), f64::from(el.client_height()))
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Backing-store size of a canvas laid out at `width × height` CSS pixels.
#[must_use]
pub fn physical_size(width: f64, height: f64, pixel_ratio: f64) -> (u32, u32) {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the u32 range before casting"
    )]
    let scale = |v: f64| (v * ratio).round().clamp(0.0, f64::from(u32::MAX)) as u32;
    (scale(width), scale(height))
}

/// Parses the options object handed to [`create_carousel`].
///
/// # Errors
///
/// Returns the JSON error for malformed input.
pub fn parse_options(json: &str) -> Result<CarouselOptions, serde_json::Error> {
    serde_json::from_str(json)
}

fn js_error(e: &dyn std::error::Error) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn init_logging() {
    // A second carousel on the page finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(target_arch = "wasm32")]
async fn create_renderer(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<RenderContext, RenderError> {
    let instance =
        wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default())
            .await;
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    RenderContext::new(&instance, surface, width, height).await
}

#[cfg(not(target_arch = "wasm32"))]
async fn create_renderer(
    _canvas: &HtmlCanvasElement,
    _width: u32,
    _height: u32,
) -> Result<RenderContext, RenderError> {
    Err(RenderError::NoAdapter)
}
