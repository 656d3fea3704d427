// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event listeners owned as a unit.

use std::fmt;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

type Handler = Closure<dyn FnMut(Event)>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    handler: Handler,
}

/// Every DOM listener a carousel registered.
///
/// Listeners are removed together by [`detach`](Self::detach) or on drop,
/// so none can outlive the carousel that owns them.
#[derive(Default)]
pub struct Subscriptions {
    listeners: Vec<Listener>,
}

impl Subscriptions {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind` events on `target`.
    ///
    /// # Errors
    ///
    /// Propagates the exception thrown by `addEventListener`.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let handler: Handler = Closure::new(handler);
        target.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            handler,
        });
        Ok(())
    }

    /// Number of live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Removes every listener from its target.
    ///
    /// Returns the JS closures instead of dropping them, since one of them
    /// may be on the call stack; the caller drops them once it has unwound.
    pub fn detach(&mut self) -> Vec<Handler> {
        self.listeners
            .drain(..)
            .map(|l| {
                let _ = l
                    .target
                    .remove_event_listener_with_callback(l.kind, l.handler.as_ref().unchecked_ref());
                l.handler
            })
            .collect()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        drop(self.detach());
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|l| l.kind))
            .finish()
    }
}
