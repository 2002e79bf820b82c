//! Timed transitions between visual states
//!
//! A [`Tween`] interpolates every property of a [`VisualState`] from a start
//! state to an end state over a fixed duration, after an optional delay.
//! Hosts tick it with frame deltas and sample [`Tween::value`].

use crate::easing::Easing;
use crate::interpolate::lerp;
use serde::{Deserialize, Serialize};

/// Animatable visual properties of an element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualState {
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Translation X in pixels
    pub translate_x: f32,
    /// Translation Y in pixels
    pub translate_y: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Rotation in degrees
    pub rotate: f32,
    /// Gaussian blur radius in pixels
    pub blur: f32,
}

impl VisualState {
    /// Fully visible, untransformed
    pub const VISIBLE: VisualState = VisualState {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate: 0.0,
        blur: 0.0,
    };

    /// Invisible, `distance` pixels below the resting position
    pub fn hidden_below(distance: f32) -> Self {
        Self {
            opacity: 0.0,
            translate_y: distance,
            ..Self::VISIBLE
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }

    pub fn lerp(&self, to: &VisualState, t: f32) -> VisualState {
        VisualState {
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            translate_x: lerp(self.translate_x, to.translate_x, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale: lerp(self.scale, to.scale, t),
            rotate: lerp(self.rotate, to.rotate, t),
            blur: lerp(self.blur, to.blur, t).max(0.0),
        }
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// A one-shot transition between two visual states
#[derive(Clone, Debug)]
pub struct Tween {
    from: VisualState,
    to: VisualState,
    duration_ms: f32,
    delay_ms: f32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
    finished: bool,
}

impl Tween {
    pub fn new(from: VisualState, to: VisualState, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms as f32,
            delay_ms: 0.0,
            easing: Easing::EaseOut,
            elapsed_ms: 0.0,
            playing: false,
            finished: false,
        }
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }

    /// Start (or restart) from the beginning
    ///
    /// A tween with no delay and no duration completes here.
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.finished = false;
        self.playing = true;
        if self.total_ms() <= 0.0 {
            self.finish();
        }
    }

    /// Jump to the end state without animating
    pub fn finish(&mut self) {
        self.elapsed_ms = self.total_ms();
        self.playing = false;
        self.finished = true;
    }

    /// Return to the start state without animating
    pub fn rewind(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = false;
        self.finished = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress through the active (post-delay) part, 0.0..=1.0
    ///
    /// Zero until started; one once finished.
    pub fn progress(&self) -> f32 {
        if self.finished {
            return 1.0;
        }
        if !self.playing {
            return 0.0;
        }
        let active = self.elapsed_ms - self.delay_ms;
        if active <= 0.0 {
            0.0
        } else {
            (active / self.duration_ms).min(1.0)
        }
    }

    /// Current interpolated state
    pub fn value(&self) -> VisualState {
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    pub fn from_state(&self) -> VisualState {
        self.from
    }

    pub fn to_state(&self) -> VisualState {
        self.to
    }

    /// Advance by `dt_ms`; returns true while still animating
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing || !dt_ms.is_finite() {
            return self.playing;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms >= self.total_ms() {
            self.finish();
        }
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_runs_after_delay() {
        let mut tween = Tween::new(VisualState::hidden_below(40.0), VisualState::VISIBLE, 600)
            .delay(100.0)
            .easing(Easing::Linear);
        tween.start();

        tween.tick(100.0);
        assert_eq!(tween.value().opacity, 0.0);

        tween.tick(300.0);
        let mid = tween.value();
        assert!((mid.opacity - 0.5).abs() < 1e-5);
        assert!((mid.translate_y - 20.0).abs() < 1e-4);

        assert!(!tween.tick(1000.0));
        assert_eq!(tween.value(), VisualState::VISIBLE);
    }

    #[test]
    fn test_unstarted_tween_holds_start_state() {
        let mut tween = Tween::new(VisualState::hidden_below(10.0), VisualState::VISIBLE, 200);
        tween.tick(500.0);
        assert_eq!(tween.value().opacity, 0.0);
    }

    #[test]
    fn test_zero_duration_holds_start_state_until_started() {
        let mut tween = Tween::new(VisualState::hidden_below(10.0), VisualState::VISIBLE, 0);
        assert!(!tween.is_finished());
        assert_eq!(tween.value(), VisualState::hidden_below(10.0));

        tween.start();
        assert!(tween.is_finished());
        assert_eq!(tween.value(), VisualState::VISIBLE);

        tween.rewind();
        assert!(!tween.is_finished());
        assert_eq!(tween.value(), VisualState::hidden_below(10.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut tween = Tween::new(VisualState::hidden_below(10.0), VisualState::VISIBLE, 0);
        tween.start();
        assert!(!tween.tick(0.0));
        assert_eq!(tween.value(), VisualState::VISIBLE);
    }
}
