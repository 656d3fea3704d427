// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine.
//!
//! [`Carousel`] owns every piece of mutable state (scroll, input, autoplay,
//! timers, render slots and their scene nodes) and advances it from two
//! kinds of calls:
//!
//! - **Input handlers** ([`pointer_down`](Carousel::pointer_down),
//!   [`wheel`](Carousel::wheel), ...) only write the scroll target and arm
//!   timers.
//! - **[`tick`](Carousel::tick)**, once per display frame, polls due timers,
//!   eases the scroll, lays out every card and evaluates the scene graph,
//!   returning a [`Frame`] for presenters.
//!
//! The host callback for center changes runs from inside `tick`, so it must
//! not call back into the carousel. Backends that hand control to script
//! should queue the index and deliver it after the tick returns.

use std::fmt;

use crate::autoplay::Autoplay;
use crate::backend::Frame;
use crate::camera::Camera;
use crate::card::{Card, CardMetrics, FrameLayout, ImageState};
use crate::config::{CarouselConfig, GalleryItem};
use crate::error::ConfigError;
use crate::input::{self, InputController, InputState};
use crate::resolver::{self, IndexTracker};
use crate::scene::{FrameChanges, NodeId, SceneGraph, TextureId};
use crate::scroll::{Direction, ScrollState};
use crate::time::HostTime;
use crate::timer::{TimerKey, TimerSet};
use crate::timing::FrameTick;
use crate::transform::Transform3d;

/// An infinite, curved image carousel.
pub struct Carousel {
    config: CarouselConfig,
    items: Vec<GalleryItem>,
    images: Vec<ImageState>,
    scene: SceneGraph,
    strip: Option<NodeId>,
    cards: Vec<Card>,
    camera: Camera,
    metrics: Option<CardMetrics>,
    scroll: ScrollState,
    direction: Direction,
    input: InputController,
    autoplay: Autoplay,
    tracker: IndexTracker,
    timers: TimerSet,
    changes: FrameChanges,
    started: bool,
    destroyed: bool,
    on_active_index_change: Box<dyn FnMut(usize)>,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("items", &self.items.len())
            .field("slots", &self.cards.len())
            .field("scroll", &self.scroll)
            .field("input", &self.input.state())
            .field("active", &self.tracker.active())
            .field("timers", &self.timers.pending())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl Carousel {
    /// Builds a carousel for `items`.
    ///
    /// `on_active_index_change` receives the logical index of the card
    /// nearest the viewport center whenever it changes. Nothing is drawn
    /// until the first [`resize`](Self::resize) with a non-empty size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(
        items: Vec<GalleryItem>,
        config: CarouselConfig,
        on_active_index_change: impl FnMut(usize) + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = items.len();
        let slots = n * resolver::slot_copies(n);
        let mut scene = SceneGraph::new();
        let mut cards = Vec::with_capacity(slots);
        let strip = if n > 0 {
            let strip = scene.create_node();
            for render_index in 0..slots {
                let logical_index = render_index % n;
                let texture = TextureId(u32::try_from(logical_index).unwrap_or(u32::MAX));
                let node = scene.create_node();
                scene.add_child(strip, node);
                scene.set_content(node, Some(texture));
                cards.push(Card::new(render_index, logical_index, node, texture));
            }
            Some(strip)
        } else {
            None
        };
        log::debug!("carousel: {n} items in {slots} slots");

        Ok(Self {
            scroll: ScrollState::new(config.scroll_ease),
            input: InputController::new(config.scroll_speed),
            autoplay: Autoplay::new(config.autoplay),
            images: vec![ImageState::Pending; n],
            items,
            scene,
            strip,
            cards,
            camera: Camera::new(),
            metrics: None,
            direction: Direction::Forward,
            tracker: IndexTracker::new(),
            timers: TimerSet::new(),
            changes: FrameChanges::default(),
            started: false,
            destroyed: false,
            on_active_index_change: Box::new(on_active_index_change),
            config,
        })
    }

    /// Gallery items.
    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Image load state per logical index.
    #[must_use]
    pub fn images(&self) -> &[ImageState] {
        &self.images
    }

    /// Validated options.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Render slots in strip order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The scene graph holding the strip and card nodes.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Camera state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Card metrics, once a usable size has been seen.
    #[must_use]
    pub fn metrics(&self) -> Option<CardMetrics> {
        self.metrics
    }

    /// Scroll state.
    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Interaction state.
    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input.state()
    }

    /// Logical index last reported to the host.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.tracker.active()
    }

    /// Whether the centered card is in its post-change dwell.
    #[must_use]
    pub fn is_emphasized(&self) -> bool {
        self.tracker.is_emphasized()
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn stride(&self) -> f64 {
        self.metrics.map_or(0.0, |m| m.stride)
    }

    /// Updates the screen size in pixels.
    ///
    /// Card sizes follow the new viewport. Scroll offsets, wrap offsets, the
    /// drag origin and any autoplay tween are rescaled by the stride ratio,
    /// so the same card stays centered, and the cards are spread evenly to
    /// both sides of it. A zero-area size suspends rendering.
    /// Calling this twice with the same size changes nothing.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.destroyed || !self.camera.resize(width, height) {
            return;
        }
        let Some(viewport) = self.camera.viewport() else {
            return;
        };
        if viewport.width > viewport.height * resolver::MAX_ASPECT {
            log::warn!(
                "viewport {width}x{height} is wider than {}:1, the strip may not fill it",
                resolver::MAX_ASPECT
            );
        }
        let metrics = CardMetrics::for_viewport(viewport);
        let previous = self.metrics.map(|m| m.stride);
        match previous {
            Some(prev) if prev > 0.0 => {
                let ratio = metrics.stride / prev;
                self.scroll.rescale(ratio);
                self.input.rescale(ratio);
                self.autoplay.rescale(ratio);
            }
            _ => {
                // Start centered on a middle copy so both sides are filled.
                let n = self.items.len();
                let start = (n * (resolver::slot_copies(n) / 2)) as f64 * metrics.stride;
                self.scroll.rebase(start - self.scroll.current);
            }
        }
        let total_width = self.cards.len() as f64 * metrics.stride;
        for card in &mut self.cards {
            card.on_resize(&metrics, previous);
            card.recenter(self.scroll.current, total_width);
        }
        self.metrics = Some(metrics);
    }

    /// Pointer or touch press at `x` pixels.
    pub fn pointer_down(&mut self, x: f64) {
        if self.destroyed {
            return;
        }
        let stride = self.stride();
        self.input.pointer_down(x, &self.scroll, stride);
        self.autoplay.cancel();
        self.timers.cancel(TimerKey::WheelSettle);
    }

    /// Pointer or touch move to `x` pixels.
    pub fn pointer_move(&mut self, x: f64) {
        if self.destroyed {
            return;
        }
        self.input.pointer_move(x, &mut self.scroll);
    }

    /// Pointer or touch release. Snaps to a slot and resolves wrap at once.
    pub fn pointer_up(&mut self) {
        if self.destroyed {
            return;
        }
        let stride = self.stride();
        if let Some(snap) = self
            .input
            .pointer_up(&mut self.scroll, stride, self.items.len())
        {
            log::debug!("snap to slot {} (item {})", snap.render_index, snap.logical_index);
            self.resolve_wrap(snap.render_index);
        }
    }

    /// Wheel event with vertical delta `delta_y`, at `now`.
    pub fn wheel(&mut self, delta_y: f64, now: HostTime) {
        if self.destroyed {
            return;
        }
        if self.input.wheel(delta_y, &mut self.scroll) {
            self.autoplay.cancel();
            self.timers.schedule_once(
                TimerKey::WheelSettle,
                now,
                self.config.timing.wheel_settle(),
            );
        }
    }

    /// Records that the image for `index` finished loading.
    pub fn image_loaded(&mut self, index: usize, width: u32, height: u32) {
        if self.destroyed {
            return;
        }
        let Some(state) = self.images.get_mut(index) else {
            return;
        };
        *state = ImageState::Ready { width, height };
        self.scene
            .touch_content(TextureId(u32::try_from(index).unwrap_or(u32::MAX)));
    }

    /// Records that the image for `index` could not be loaded.
    pub fn image_failed(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        if let Some(state) = self.images.get_mut(index) {
            log::warn!("image {index} failed to load, card stays blank");
            *state = ImageState::Failed;
        }
    }

    /// Tears the carousel down: clears every timer, drops the scene and
    /// ignores all further calls.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.clear();
        self.autoplay.cancel();
        self.input.reset();
        self.scene.clear();
        self.cards.clear();
        self.strip = None;
        self.destroyed = true;
        log::debug!("carousel destroyed");
    }

    /// Advances one display frame.
    ///
    /// Returns `None` when there is nothing to draw: no items, no usable
    /// viewport, or after [`destroy`](Self::destroy). Timers still run
    /// while the viewport is empty.
    pub fn tick(&mut self, tick: FrameTick) -> Option<Frame<'_>> {
        if self.destroyed || self.items.is_empty() {
            return None;
        }
        let now = tick.now;
        if !self.started {
            self.start_timers(now);
        }
        for key in self.timers.poll(now) {
            self.on_timer(key, now);
        }

        let metrics = self.metrics?;
        let viewport = self.camera.viewport()?;

        if let Some(target) = self.autoplay.sample(now) {
            self.scroll.target = target;
        }
        self.direction = self.scroll.advance();
        self.input.on_frame(&self.scroll);

        let layout = FrameLayout {
            metrics,
            half_width: viewport.width / 2.0,
            bend: self.config.bend,
            total_width: self.cards.len() as f64 * metrics.stride,
        };
        for card in &mut self.cards {
            card.update(&self.scroll, self.direction, &layout);
            self.scene.set_transform(card.node, card.local_transform(&metrics));
            self.scene.set_opacity(card.node, card.alpha);
        }
        self.sync_strip();
        self.scroll.commit_frame();

        self.scene.evaluate_into(&mut self.changes);

        Some(Frame {
            scene: &self.scene,
            changes: &self.changes,
            camera: &self.camera,
            cards: &self.cards,
            metrics,
            items: &self.items,
            images: &self.images,
            border_radius: self.config.border_radius,
            active: self.tracker.active(),
            emphasized: self.tracker.is_emphasized(),
        })
    }

    fn start_timers(&mut self, now: HostTime) {
        let timing = &self.config.timing;
        self.timers
            .schedule_repeating(TimerKey::Tracking, now, timing.tracking_interval());
        if self.autoplay.is_enabled() {
            self.timers
                .schedule_repeating(TimerKey::Autoplay, now, timing.autoplay_interval());
        }
        self.started = true;
    }

    fn on_timer(&mut self, key: TimerKey, now: HostTime) {
        match key {
            TimerKey::Autoplay => self.advance_autoplay(now),
            TimerKey::Tracking => self.track(now),
            TimerKey::WheelSettle => {
                let stride = self.stride();
                if let Some(snap) =
                    self.input
                        .settle_wheel(&mut self.scroll, stride, self.items.len())
                {
                    self.resolve_wrap(snap.render_index);
                }
            }
            TimerKey::Dwell => self.tracker.end_dwell(),
        }
    }

    fn advance_autoplay(&mut self, now: HostTime) {
        if self.input.is_dragging() || self.tracker.is_emphasized() || self.items.is_empty() {
            return;
        }
        let Some(metrics) = self.metrics else {
            return;
        };
        let next = input::nearest_index(self.scroll.current, metrics.stride) + 1;
        self.autoplay.begin(
            self.scroll.target,
            next as f64 * metrics.stride,
            now,
            self.config.timing.autoplay_tween(),
        );
    }

    /// Center tracking: re-centers the render index and notifies the host
    /// when the centered item changes.
    fn track(&mut self, now: HostTime) {
        let (Some(metrics), Some(strip)) = (self.metrics, self.strip) else {
            return;
        };
        let offset = -self.scene.local_transform(strip).translation()[0];
        self.resolve_wrap(input::nearest_index(offset, metrics.stride));
        // A rebase moves by whole sets and leaves the centered item as is.
        let Some(index) = resolver::resolve_center_index(offset, metrics.stride, self.items.len())
        else {
            return;
        };
        if self.tracker.observe(index) {
            log::debug!("active index -> {index}");
            (self.on_active_index_change)(index);
            self.timers
                .schedule_once(TimerKey::Dwell, now, self.config.timing.dwell());
        }
    }

    /// Moves everything by whole set-widths if `render_index` has left the
    /// safe middle region. Returns the shift in slots.
    fn resolve_wrap(&mut self, render_index: i64) -> i64 {
        let Some(metrics) = self.metrics else {
            return 0;
        };
        let shift = resolver::rebase_slots(render_index, self.items.len(), self.cards.len());
        if shift == 0 {
            return 0;
        }
        let delta = shift as f64 * metrics.stride;
        log::debug!("wrap-rebase by {shift} slots");
        self.scroll.rebase(delta);
        self.input.rebase(delta, shift);
        self.autoplay.rebase(delta);
        for card in &mut self.cards {
            card.rebase(delta);
            self.scene.set_transform(card.node, card.local_transform(&metrics));
        }
        self.sync_strip();
        shift
    }

    fn sync_strip(&mut self) {
        if let Some(strip) = self.strip {
            self.scene.set_transform(
                strip,
                Transform3d::from_translation(-self.scroll.current, 0.0, 0.0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::card::GAP;

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| GalleryItem::new(format!("img/{i}.webp"), format!("Item {i}")))
            .collect()
    }

    fn carousel(n: usize, config: CarouselConfig) -> (Carousel, Rc<RefCell<Vec<usize>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let c = Carousel::new(items(n), config, move |i| sink.borrow_mut().push(i)).unwrap();
        (c, seen)
    }

    fn at_ms(ms: u64) -> HostTime {
        HostTime(ms * 1_000)
    }

    /// Ticks every 16 ms from `from` up to and including `to`.
    fn run(c: &mut Carousel, from: u64, to: u64) {
        let mut t = from;
        while t <= to {
            let _ = c.tick(FrameTick::new(at_ms(t), t / 16));
            t += 16;
        }
    }

    fn world_xs(c: &Carousel) -> Vec<f64> {
        c.cards()
            .iter()
            .map(|card| c.scene().world_transform(card.node).translation()[0])
            .collect()
    }

    #[test]
    fn end_to_end_hero() {
        let config = CarouselConfig {
            bend: 2.0,
            scroll_ease: 0.02,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        for i in 0..100 {
            let frame = c.tick(FrameTick::new(at_ms(i * 16), i));
            assert!(frame.is_some(), "frame {i} skipped");
        }
        let seen = seen.borrow();
        assert!(!seen.is_empty(), "callback never fired");
        assert!(seen.iter().all(|&i| i < 5), "{seen:?}");
        assert!(c.is_emphasized(), "still inside the dwell");
        assert!(c.pending_timers() > 0);

        c.destroy();
        assert_eq!(c.pending_timers(), 0);
        assert!(c.tick(FrameTick::new(at_ms(2_000), 125)).is_none());
    }

    #[test]
    fn starts_centered_on_first_item() {
        let (mut c, seen) = carousel(5, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 200);
        assert_eq!(*seen.borrow(), [0]);
        let stride = c.metrics().unwrap().stride;
        assert!((c.scroll().current - 10.0 * stride).abs() < 1e-9);
        assert!(
            c.cards().iter().any(|card| card.x < 0.0),
            "left of center is filled"
        );
    }

    #[test]
    fn autoplay_advances_one_slot() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 7_000);
        assert_eq!(*seen.borrow(), [0, 1]);
        let stride = c.metrics().unwrap().stride;
        let slot = c.scroll().target / stride;
        assert!((slot - slot.round()).abs() < 1e-9, "lands on a slot");
    }

    #[test]
    fn autoplay_pauses_while_pointer_is_down() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 4_960);
        let before = c.scroll().target;

        c.pointer_down(400.0);
        run(&mut c, 4_976, 6_000);
        assert_eq!(c.scroll().target, before, "timer fired during the press");
        assert!(c.autoplay.tween().is_none());

        c.pointer_up();
        assert_eq!(c.input_state(), InputState::Snapping);
        run(&mut c, 6_016, 6_100);
        assert_eq!(*seen.borrow(), [0]);
    }

    #[test]
    fn drag_past_a_quarter_moves_one_item() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            scroll_speed: 1.0,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 500);
        let stride = c.metrics().unwrap().stride;
        let px = (stride / 2.0) / input::DRAG_SENSITIVITY;
        c.pointer_down(600.0);
        c.pointer_move(600.0 - px);
        c.pointer_up();
        run(&mut c, 516, 1_000);
        assert_eq!(*seen.borrow(), [0, 1]);
    }

    #[test]
    fn wheel_settles_on_a_slot() {
        let (mut c, _) = carousel(5, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 100);
        c.wheel(120.0, at_ms(100));
        c.wheel(120.0, at_ms(150));
        assert!(c.timers.is_pending(TimerKey::WheelSettle));
        run(&mut c, 116, 400);
        assert!(!c.timers.is_pending(TimerKey::WheelSettle));
        let stride = c.metrics().unwrap().stride;
        let slot = c.scroll().target / stride;
        assert!((slot - slot.round()).abs() < 1e-9);
    }

    #[test]
    fn opacity_by_slot_distance() {
        let (mut c, _) = carousel(12, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        assert!(c.tick(FrameTick::new(at_ms(0), 0)).is_some());
        let center = c.cards().iter().find(|card| card.x.abs() < 1e-9).unwrap();
        let two_away = c
            .cards()
            .iter()
            .find(|card| card.render_index == center.render_index + 2)
            .unwrap();
        assert_eq!(center.alpha, 1.0);
        assert_eq!(two_away.alpha, 0.8);
    }

    #[test]
    fn wrap_rebase_is_invisible() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            autoplay: false,
            ..CarouselConfig::hero()
        };
        let (mut c, _) = carousel(5, config);
        c.resize(1280.0, 720.0);
        let stride = c.metrics().unwrap().stride;
        // Park the center on slot 24, outside the safe region [2, 23).
        c.scroll.rebase(24.0 * stride - c.scroll.current);
        assert!(c.tick(FrameTick::new(at_ms(0), 0)).is_some());
        let before = world_xs(&c);

        let shift = c.resolve_wrap(24);
        assert_eq!(shift, -5);
        let _ = c.scene.evaluate();
        let after = world_xs(&c);
        for (b, a) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-9, "{b} -> {a}");
        }
        assert!((c.scroll().current - 19.0 * stride).abs() < 1e-9);
    }

    #[test]
    fn tracking_rebases_long_runs() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        // Two minutes of autoplay walk past the end of the 25-slot strip.
        run(&mut c, 0, 120_000);
        let stride = c.metrics().unwrap().stride;
        let center = input::nearest_index(c.scroll().current, stride);
        assert!((2..23).contains(&center), "center slot {center}");
        assert!(seen.borrow().iter().all(|&i| i < 5));
        assert!(seen.borrow().len() > 5, "wrapped past the last item");
    }

    /// Ticks every 16 ms and checks after each frame that the cards form one
    /// unbroken row reaching both edges of the viewport.
    fn assert_covered(c: &mut Carousel, from: u64, to: u64) {
        let half = c.camera().viewport().unwrap().width / 2.0;
        let m = c.metrics().unwrap();
        let mut t = from;
        while t <= to {
            let _ = c.tick(FrameTick::new(at_ms(t), t / 16));
            let mut xs: Vec<f64> = c.cards().iter().map(|card| card.x).collect();
            xs.sort_by(f64::total_cmp);
            for pair in xs.windows(2) {
                assert!(
                    (pair[1] - pair[0] - m.stride).abs() < 1e-6,
                    "{} items at {t} ms: hole between {} and {}",
                    c.items().len(),
                    pair[0],
                    pair[1]
                );
            }
            let left = c
                .cards()
                .iter()
                .map(|card| card.x - m.width * card.scale / 2.0)
                .fold(f64::INFINITY, f64::min);
            let right = c
                .cards()
                .iter()
                .map(|card| card.x + m.width * card.scale / 2.0)
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(
                left <= -half + GAP + 1e-9,
                "{} items at {t} ms: left edge uncovered ({left} vs {})",
                c.items().len(),
                -half
            );
            assert!(
                right >= half - GAP - 1e-9,
                "{} items at {t} ms: right edge uncovered ({right} vs {half})",
                c.items().len()
            );
            t += 16;
        }
    }

    #[test]
    fn wide_viewports_are_covered_edge_to_edge() {
        for (width, height) in [(2560.0, 600.0), (3440.0, 600.0)] {
            for n in 1..=5 {
                let (mut c, _) = carousel(n, CarouselConfig::hero());
                c.resize(width, height);
                assert_covered(&mut c, 0, 60_000);
            }
        }
    }

    #[test]
    fn widening_after_scrolling_refills_the_trailing_side() {
        let config = CarouselConfig {
            scroll_ease: 0.2,
            ..CarouselConfig::hero()
        };
        for n in [1, 3, 8] {
            let (mut c, _) = carousel(n, config.clone());
            c.resize(1280.0, 720.0);
            run(&mut c, 0, 20_000);
            c.resize(3440.0, 600.0);
            assert_covered(&mut c, 20_016, 32_000);
        }
    }

    #[test]
    fn dwell_restarts_when_the_center_changes() {
        let config = CarouselConfig {
            scroll_ease: 1.0,
            scroll_speed: 1.0,
            autoplay: false,
            ..CarouselConfig::hero()
        };
        let (mut c, seen) = carousel(5, config);
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 496);
        assert_eq!(*seen.borrow(), [0]);
        assert!(c.is_emphasized());

        // The first dwell would end near 2.1 s; move on to item 1 at 0.5 s.
        let stride = c.metrics().unwrap().stride;
        let px = (stride / 2.0) / input::DRAG_SENSITIVITY;
        c.pointer_down(600.0);
        c.pointer_move(600.0 - px);
        c.pointer_up();
        run(&mut c, 512, 2_400);
        assert_eq!(*seen.borrow(), [0, 1]);
        assert!(c.is_emphasized(), "dwell restarted with the second change");
        assert!(c.timers.is_pending(TimerKey::Dwell));

        run(&mut c, 2_416, 2_800);
        assert!(!c.is_emphasized());
        assert!(!c.timers.is_pending(TimerKey::Dwell));
    }

    #[test]
    fn resize_is_idempotent() {
        let (mut c, _) = carousel(5, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 300);
        c.resize(800.0, 600.0);
        let scroll = *c.scroll();
        let extras: Vec<f64> = c.cards().iter().map(|card| card.extra).collect();
        c.resize(800.0, 600.0);
        assert_eq!(*c.scroll(), scroll);
        let again: Vec<f64> = c.cards().iter().map(|card| card.extra).collect();
        assert_eq!(extras, again);
    }

    #[test]
    fn resize_keeps_the_centered_item() {
        let (mut c, _) = carousel(5, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        run(&mut c, 0, 300);
        let stride = c.metrics().unwrap().stride;
        let before = c.scroll().current / stride;
        c.resize(640.0, 360.0);
        let after = c.scroll().current / c.metrics().unwrap().stride;
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn zero_area_skips_frames() {
        let (mut c, _) = carousel(5, CarouselConfig::hero());
        assert!(c.tick(FrameTick::new(at_ms(0), 0)).is_none(), "no size yet");
        c.resize(0.0, 720.0);
        assert!(c.tick(FrameTick::new(at_ms(16), 1)).is_none());
        c.resize(1280.0, 720.0);
        let frame = c.tick(FrameTick::new(at_ms(32), 2)).unwrap();
        assert!(frame.cards.iter().all(|card| card.x.is_finite()));
    }

    #[test]
    fn zero_items_is_inert() {
        let (mut c, seen) = carousel(0, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        c.pointer_down(10.0);
        c.pointer_move(500.0);
        c.pointer_up();
        c.wheel(100.0, at_ms(0));
        c.image_loaded(0, 10, 10);
        run(&mut c, 0, 6_000);
        assert!(c.tick(FrameTick::new(at_ms(6_016), 0)).is_none());
        assert!(seen.borrow().is_empty());
        assert!(c.cards().is_empty());
        c.destroy();
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn image_load_marks_every_copy() {
        let (mut c, _) = carousel(3, CarouselConfig::hero());
        c.resize(1280.0, 720.0);
        let _ = c.tick(FrameTick::new(at_ms(0), 0));
        c.image_loaded(1, 640, 960);
        c.image_failed(2);
        c.image_loaded(7, 1, 1);
        let frame = c.tick(FrameTick::new(at_ms(16), 1)).unwrap();
        assert_eq!(frame.images[1], ImageState::Ready { width: 640, height: 960 });
        assert_eq!(frame.images[2], ImageState::Failed);
        assert_eq!(frame.changes.content.len(), 8, "eight copies of item 1");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig {
            scroll_ease: 0.0,
            ..CarouselConfig::hero()
        };
        let err = Carousel::new(items(3), config, |_| {}).unwrap_err();
        assert_eq!(err, ConfigError::ScrollEase(0.0));
    }
}
