// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous image loading.
//!
//! Each gallery image is fetched, decoded and uploaded on its own task. A
//! task only holds a weak reference to the carousel, so a carousel destroyed
//! while images are in flight is simply not found when they land.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use marquee_core::GalleryItem;
use marquee_render::{DecodedImage, RenderError, decode_image};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::State;

/// Why an image never reached the GPU.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request itself failed.
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// Decoding or uploading failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<JsValue> for LoadError {
    fn from(value: JsValue) -> Self {
        Self::Fetch(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Starts one load task per gallery item.
pub(crate) fn spawn_loads(state: &Rc<RefCell<State>>, items: &[GalleryItem]) {
    for (index, item) in items.iter().enumerate() {
        let weak = Rc::downgrade(state);
        let url = item.image.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_image(&url).await;
            deliver(&weak, index, &url, result);
        });
    }
}

async fn fetch_image(url: &str) -> Result<DecodedImage, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(decode_image(&bytes)?)
}

fn deliver(
    weak: &Weak<RefCell<State>>,
    index: usize,
    url: &str,
    result: Result<DecodedImage, LoadError>,
) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let mut guard = state.borrow_mut();
    let s = &mut *guard;
    if s.carousel.is_destroyed() {
        return;
    }

    let uploaded = result.and_then(|image| {
        if let Some(renderer) = s.renderer.as_mut() {
            renderer.upload_image(index, &image)?;
        }
        Ok(image)
    });
    match uploaded {
        Ok(image) => {
            log::debug!("loaded {url} ({}×{})", image.width, image.height);
            s.carousel.image_loaded(index, image.width, image.height);
        }
        Err(e) => {
            log::warn!("could not load {url}: {e}");
            s.carousel.image_failed(index);
        }
    }
}
