//! Reveal-on-visibility
//!
//! A [`Reveal`] plays an entry transition the first time its element comes
//! into view. Observation is event-driven: the reveal listens to window
//! scroll and resize events and tests the element against the viewport on
//! each one, with no polling loop. An element already in view at mount
//! reveals immediately.
//!
//! With `once` set (the default) the transition is sticky: leaving and
//! re-entering the viewport never replays it. With `once` cleared the
//! element returns to its initial state on exit and replays on re-entry.

use crate::motion::Motion;
use attest_animation::{Easing, Tween, VisualState};
use attest_core::events::{event_types, WINDOW};
use attest_core::sync::lock;
use attest_core::{EventDispatcher, Rect, Subscription, Viewport};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Reveal configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Pixels added to every edge of the viewport before testing (negative
    /// values require the element to be further inside)
    pub margin: f32,
    /// Fraction of the element's area that must be visible, 0.0..=1.0
    /// (0.0 means any overlap)
    pub threshold: f32,
    /// Reveal only the first time the element enters
    pub once: bool,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
    /// Visual state before the reveal
    pub from: VisualState,
    /// Visual state after the reveal
    pub to: VisualState,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            margin: 0.0,
            threshold: 0.0,
            once: true,
            duration_ms: 600,
            delay_ms: 0,
            easing: Easing::SMOOTH,
            from: VisualState::hidden_below(40.0),
            to: VisualState::VISIBLE,
        }
    }
}

impl RevealConfig {
    /// Fade in while sliding up by `distance` pixels
    pub fn fade_up(distance: f32) -> Self {
        Self {
            from: VisualState::hidden_below(distance),
            ..Default::default()
        }
    }

    /// Fade in from a slightly smaller scale
    pub fn scale_in() -> Self {
        Self {
            from: VisualState::VISIBLE.with_opacity(0.0).with_scale(0.95),
            ..Default::default()
        }
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn repeat(mut self) -> Self {
        self.once = false;
        self
    }
}

/// Whether `element` counts as visible in `viewport` under `config`
pub fn is_in_view(element: &Rect, viewport: &Viewport, margin: f32, threshold: f32) -> bool {
    let area = viewport.rect().inflate(margin);
    let element_area = element.width * element.height;
    if element_area <= 0.0 {
        return area.contains(element.center());
    }
    if !area.intersects(element) {
        return false;
    }
    let threshold = if threshold.is_finite() {
        threshold.clamp(0.0, 1.0)
    } else {
        0.0
    };
    area.intersection_area(element) / element_area >= threshold
}

type EnterCallback = Box<dyn FnMut(u32) + Send>;

struct RevealState {
    config: RevealConfig,
    element: Rect,
    motion: Motion,
    visible: bool,
    enter_count: u32,
    tween: Tween,
}

impl RevealState {
    /// Returns the enter count when this observation starts a reveal
    fn observe(&mut self, viewport: &Viewport) -> Option<u32> {
        let visible = is_in_view(
            &self.element,
            viewport,
            self.config.margin,
            self.config.threshold,
        );
        if visible == self.visible {
            return None;
        }
        self.visible = visible;

        if !visible {
            if !self.config.once {
                self.tween.rewind();
            }
            return None;
        }
        if self.config.once && self.enter_count > 0 {
            return None;
        }

        self.enter_count += 1;
        if self.motion.is_reduced() {
            self.tween.finish();
        } else {
            self.tween.start();
        }
        tracing::debug!(enter_count = self.enter_count, "reveal entered viewport");
        Some(self.enter_count)
    }
}

/// An element that animates in when it becomes visible
pub struct Reveal {
    state: Arc<Mutex<RevealState>>,
    callbacks: Arc<Mutex<Vec<EnterCallback>>>,
    subscription: Option<Subscription>,
}

impl Reveal {
    pub fn new(element: Rect, config: RevealConfig) -> Self {
        let tween = Tween::new(config.from, config.to, config.duration_ms)
            .delay(config.delay_ms as f32)
            .easing(config.easing);
        Self {
            state: Arc::new(Mutex::new(RevealState {
                config,
                element,
                motion: Motion::Full,
                visible: false,
                enter_count: 0,
                tween,
            })),
            callbacks: Arc::new(Mutex::new(Vec::new())),
            subscription: None,
        }
    }

    pub fn with_motion(self, motion: Motion) -> Self {
        lock(&self.state).motion = motion;
        self
    }

    /// Run `callback` each time the entry transition starts
    pub fn on_enter<F>(self, callback: F) -> Self
    where
        F: FnMut(u32) + Send + 'static,
    {
        lock(&self.callbacks).push(Box::new(callback));
        self
    }

    /// Start observing; reveals at once if the element is already in view
    pub fn mount(&mut self, dispatcher: &EventDispatcher, viewport: Viewport) {
        if self.subscription.is_some() {
            return;
        }
        observe(&self.state, &self.callbacks, &viewport);

        let state = Arc::downgrade(&self.state);
        let callbacks = Arc::downgrade(&self.callbacks);
        self.subscription = Some(dispatcher.register_many(
            WINDOW,
            &[event_types::SCROLL, event_types::RESIZE],
            move |event| {
                let Some(viewport) = event.viewport() else {
                    return;
                };
                if let (Some(state), Some(callbacks)) = (state.upgrade(), callbacks.upgrade()) {
                    observe(&state, &callbacks, &viewport);
                }
            },
        ));
    }

    /// Stop observing; the current visual state is kept
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Test against `viewport` without an event
    pub fn observe(&self, viewport: &Viewport) {
        observe(&self.state, &self.callbacks, viewport);
    }

    /// Move the element after a layout change
    pub fn set_element(&self, element: Rect) {
        lock(&self.state).element = element;
    }

    /// Advance the transition by `dt_ms`; returns true while animating
    pub fn tick(&self, dt_ms: f32) -> bool {
        lock(&self.state).tween.tick(dt_ms)
    }

    /// Visual state to render now
    pub fn value(&self) -> VisualState {
        lock(&self.state).tween.value()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    /// Whether the entry transition has started at least once and the
    /// element has not since been reset
    pub fn is_revealed(&self) -> bool {
        let state = lock(&self.state);
        state.enter_count > 0 && (state.tween.is_playing() || state.tween.is_finished())
    }

    /// How many times the entry transition has started
    pub fn enter_count(&self) -> u32 {
        lock(&self.state).enter_count
    }
}

fn observe(
    state: &Mutex<RevealState>,
    callbacks: &Mutex<Vec<EnterCallback>>,
    viewport: &Viewport,
) {
    let entered = lock(state).observe(viewport);
    if let Some(count) = entered {
        for callback in lock(callbacks).iter_mut() {
            callback(count);
        }
    }
}
