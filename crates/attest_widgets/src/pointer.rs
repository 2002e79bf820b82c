//! Pointer-reactive transforms (tilt and magnetic hover)
//!
//! The pointer's offset from the element's center, normalised by the
//! element's size to `-0.5..=0.5` per axis, drives two springs. Rotation
//! and translation are read from the spring values scaled by per-site
//! strengths. On pointer leave the springs return to zero.
//!
//! Interaction is an explicit three-state machine decoupled from
//! rendering:
//!
//! ```text
//! AtRest --move--> Tracking --leave--> Returning --settled--> AtRest
//!                     ^                    |
//!                     +-------move---------+
//! ```

use crate::motion::Motion;
use attest_animation::{Spring, SpringConfig};
use attest_core::events::event_types;
use attest_core::fsm::{StateMachine, StateTransitions};
use attest_core::sync::lock;
use attest_core::{Event, EventData, EventDispatcher, Point, Rect, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Pointer transform configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Degrees of rotation per unit of normalised offset
    pub rotate_strength_deg: f32,
    /// Pixels of translation per unit of normalised offset
    pub translate_strength_px: f32,
    pub spring: SpringConfig,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self::tilt(10.0)
    }
}

impl PointerConfig {
    /// Rotation only
    pub fn tilt(strength_deg: f32) -> Self {
        Self {
            rotate_strength_deg: strength_deg,
            translate_strength_px: 0.0,
            spring: SpringConfig::tilt(),
        }
    }

    /// Translation toward the pointer only
    pub fn magnetic(strength_px: f32) -> Self {
        Self {
            rotate_strength_deg: 0.0,
            translate_strength_px: strength_px,
            spring: SpringConfig::snappy(),
        }
    }
}

/// Normalised pointer offset from the element's center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    pub const ZERO: PointerOffset = PointerOffset { x: 0.0, y: 0.0 };

    /// Offset of `pointer` within `bounds`, clamped to `-0.5..=0.5`
    pub fn from_pointer(pointer: Point, bounds: &Rect) -> Self {
        let axis = |p: f32, center: f32, extent: f32| {
            if extent <= 0.0 || !p.is_finite() {
                return 0.0;
            }
            ((p - center) / extent).clamp(-0.5, 0.5)
        };
        let center = bounds.center();
        Self {
            x: axis(pointer.x, center.x, bounds.width),
            y: axis(pointer.y, center.y, bounds.height),
        }
    }
}

/// Interaction state of a pointer transform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    AtRest,
    Tracking,
    Returning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    Move,
    Leave,
    Settled,
}

impl StateTransitions for PointerPhase {
    type Event = PointerInput;

    fn on_event(&self, event: PointerInput) -> Option<Self> {
        use PointerInput::*;
        use PointerPhase::*;
        match (self, event) {
            (AtRest, Move) | (Returning, Move) => Some(Tracking),
            (Tracking, Leave) => Some(Returning),
            (Returning, Settled) => Some(AtRest),
            _ => None,
        }
    }
}

struct PointerState {
    config: PointerConfig,
    bounds: Rect,
    motion: Motion,
    x: Spring,
    y: Spring,
    fsm: StateMachine<PointerPhase>,
}

impl PointerState {
    fn pointer_move(&mut self, pointer: Point) {
        if self.motion.is_reduced() {
            return;
        }
        let offset = PointerOffset::from_pointer(pointer, &self.bounds);
        self.x.set_target(offset.x);
        self.y.set_target(offset.y);
        self.fsm.send(PointerInput::Move);
    }

    fn pointer_leave(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
        if self.fsm.send(PointerInput::Leave) == PointerPhase::Returning {
            tracing::trace!("pointer left, returning to rest");
        }
    }

    fn tick(&mut self, dt: f32) -> bool {
        self.x.step(dt);
        self.y.step(dt);
        let settled = self.x.is_settled() && self.y.is_settled();
        if settled && self.fsm.is_in(PointerPhase::Returning) {
            self.x.snap_to(0.0);
            self.y.snap_to(0.0);
            self.fsm.send(PointerInput::Settled);
        }
        !settled
    }

    fn handle(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (
                event_types::POINTER_MOVE | event_types::POINTER_ENTER,
                EventData::Pointer { x, y },
            ) => {
                self.pointer_move(Point::new(*x, *y));
            }
            (event_types::POINTER_LEAVE, _) => self.pointer_leave(),
            _ => {}
        }
    }
}

/// Spring-smoothed rotation and translation following the pointer
pub struct PointerTransform {
    state: Arc<Mutex<PointerState>>,
    subscription: Option<Subscription>,
}

impl PointerTransform {
    pub fn new(bounds: Rect, config: PointerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(PointerState {
                config,
                bounds,
                motion: Motion::Full,
                x: Spring::new(config.spring, 0.0),
                y: Spring::new(config.spring, 0.0),
                fsm: StateMachine::new(PointerPhase::AtRest),
            })),
            subscription: None,
        }
    }

    /// Under reduced motion the element stays at rest
    pub fn with_motion(self, motion: Motion) -> Self {
        lock(&self.state).motion = motion;
        self
    }

    /// Listen to pointer events aimed at `target`
    ///
    /// Listeners are registered once per mount; attaching again while
    /// attached does nothing.
    pub fn attach(&mut self, dispatcher: &EventDispatcher, target: u64) {
        if self.subscription.is_some() {
            tracing::debug!(target, "pointer transform already attached");
            return;
        }
        let state = Arc::downgrade(&self.state);
        self.subscription = Some(dispatcher.register_many(
            target,
            &[
                event_types::POINTER_ENTER,
                event_types::POINTER_MOVE,
                event_types::POINTER_LEAVE,
            ],
            move |event| {
                if let Some(state) = state.upgrade() {
                    lock(&state).handle(event);
                }
            },
        ));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        lock(&self.state).bounds = bounds;
    }

    /// Pointer moved to `pointer` (page coordinates)
    pub fn pointer_move(&self, pointer: Point) {
        lock(&self.state).pointer_move(pointer);
    }

    pub fn pointer_leave(&self) {
        lock(&self.state).pointer_leave();
    }

    /// Advance the springs by `dt` seconds; returns true while moving
    pub fn tick(&self, dt: f32) -> bool {
        lock(&self.state).tick(dt)
    }

    pub fn phase(&self) -> PointerPhase {
        lock(&self.state).fsm.current_state()
    }

    /// Spring-smoothed offset
    pub fn offset(&self) -> PointerOffset {
        let state = lock(&self.state);
        PointerOffset {
            x: state.x.value(),
            y: state.y.value(),
        }
    }

    /// Offset the springs are heading to
    pub fn target_offset(&self) -> PointerOffset {
        let state = lock(&self.state);
        PointerOffset {
            x: state.x.target(),
            y: state.y.target(),
        }
    }

    /// `(rotate_x, rotate_y)` in degrees
    ///
    /// Pointer below center tips the top edge away (negative X rotation);
    /// pointer right of center turns the element toward it.
    pub fn rotation(&self) -> (f32, f32) {
        let state = lock(&self.state);
        let strength = state.config.rotate_strength_deg;
        (-state.y.value() * strength, state.x.value() * strength)
    }

    /// `(translate_x, translate_y)` in pixels
    pub fn translation(&self) -> (f32, f32) {
        let state = lock(&self.state);
        let strength = state.config.translate_strength_px;
        (state.x.value() * strength, state.y.value() * strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 100.0)
    }

    fn settle(transform: &PointerTransform) {
        for _ in 0..1200 {
            if !transform.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_offset_normalisation() {
        let bounds = card();
        assert_eq!(PointerOffset::from_pointer(bounds.center(), &bounds), PointerOffset::ZERO);
        let corner = PointerOffset::from_pointer(Point::new(300.0, 200.0), &bounds);
        assert_eq!(corner, PointerOffset { x: 0.5, y: 0.5 });
        let outside = PointerOffset::from_pointer(Point::new(1000.0, -500.0), &bounds);
        assert_eq!(outside, PointerOffset { x: 0.5, y: -0.5 });
        let empty = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(PointerOffset::from_pointer(Point::new(5.0, 5.0), &empty), PointerOffset::ZERO);
    }

    #[test]
    fn test_tracks_then_returns_to_rest() {
        let transform = PointerTransform::new(card(), PointerConfig::tilt(20.0));
        assert_eq!(transform.phase(), PointerPhase::AtRest);

        transform.pointer_move(Point::new(250.0, 125.0));
        assert_eq!(transform.phase(), PointerPhase::Tracking);
        assert_eq!(transform.target_offset(), PointerOffset { x: 0.25, y: -0.25 });

        settle(&transform);
        let (rx, ry) = transform.rotation();
        assert!((rx - 5.0).abs() < 0.1);
        assert!((ry - 5.0).abs() < 0.1);
        assert_eq!(transform.translation(), (0.0, 0.0));

        transform.pointer_leave();
        assert_eq!(transform.phase(), PointerPhase::Returning);
        // Springs ease back rather than snapping
        transform.tick(1.0 / 60.0);
        assert!(transform.offset().x > 0.0);

        settle(&transform);
        assert_eq!(transform.phase(), PointerPhase::AtRest);
        assert_eq!(transform.offset(), PointerOffset::ZERO);
    }

    #[test]
    fn test_magnetic_translation() {
        let transform = PointerTransform::new(card(), PointerConfig::magnetic(30.0));
        transform.pointer_move(Point::new(300.0, 150.0));
        settle(&transform);
        let (tx, ty) = transform.translation();
        assert!((tx - 15.0).abs() < 0.1);
        assert!(ty.abs() < 0.1);
    }

    #[test]
    fn test_attach_registers_once() {
        let dispatcher = EventDispatcher::new();
        let mut transform = PointerTransform::new(card(), PointerConfig::default());
        transform.attach(&dispatcher, 42);
        transform.attach(&dispatcher, 42);
        assert_eq!(dispatcher.handler_count(), 3);

        dispatcher.dispatch(&mut Event::pointer(event_types::POINTER_MOVE, 42, 300.0, 100.0));
        assert_eq!(transform.phase(), PointerPhase::Tracking);
        dispatcher.dispatch(&mut Event::new(event_types::POINTER_LEAVE, 42, EventData::None));
        assert_eq!(transform.phase(), PointerPhase::Returning);

        drop(transform);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_reduced_motion_stays_at_rest() {
        let transform =
            PointerTransform::new(card(), PointerConfig::default()).with_motion(Motion::Reduced);
        transform.pointer_move(Point::new(300.0, 200.0));
        assert_eq!(transform.phase(), PointerPhase::AtRest);
        assert_eq!(transform.offset(), PointerOffset::ZERO);
    }
}
