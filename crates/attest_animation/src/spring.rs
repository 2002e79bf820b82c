//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs are
//! interruptible: retargeting keeps the current velocity, so a hover that
//! ends mid-flight curves back smoothly instead of snapping.

use serde::{Deserialize, Serialize};

/// Largest integration step; bigger frame deltas are subdivided
const MAX_STEP_SECS: f32 = 1.0 / 240.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Speed below which the spring may come to rest
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
    /// Distance from target below which the spring may come to rest
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f32,
}

fn default_rest_speed() -> f32 {
    0.01
}

fn default_rest_delta() -> f32 {
    0.01
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_speed: 0.01,
            rest_delta: 0.01,
        }
    }

    /// Fast, no visible overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick with a little bounce; the default for hover feedback
    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Slow and soft; used for panel height changes
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible overshoot
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Tilt cards: soft enough to feel weighty
    pub const fn tilt() -> Self {
        Self::new(150.0, 15.0, 0.1)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// A single animated scalar driven by a spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Retarget, keeping the current velocity
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < self.config.rest_speed
            && (self.value - self.target).abs() < self.config.rest_delta
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        let steps = (dt / MAX_STEP_SECS).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                break;
            }
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let c = &self.config;
        let mass = if c.mass > 0.0 { c.mass } else { 1.0 };
        (-c.stiffness * (x - self.target) - c.damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, secs: f32) {
        let frames = (secs * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_on_target() {
        for config in [
            SpringConfig::stiff(),
            SpringConfig::snappy(),
            SpringConfig::gentle(),
            SpringConfig::wobbly(),
            SpringConfig::tilt(),
        ] {
            let mut spring = Spring::new(config, 0.0);
            spring.set_target(100.0);
            run(&mut spring, 5.0);
            assert!(spring.is_settled(), "{config:?}");
            assert_eq!(spring.value(), 100.0);
        }
    }

    #[test]
    fn test_wobbly_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);
        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(100.0);
        run(&mut spring, 0.1);
        let v = spring.velocity();
        assert!(v > 0.0);

        spring.set_target(0.0);
        assert_eq!(spring.velocity(), v);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut spring = Spring::new(SpringConfig::default(), 3.0);
        spring.set_target(f32::NAN);
        spring.snap_to(f32::INFINITY);
        assert_eq!(spring.target(), 3.0);
        assert_eq!(spring.value(), 3.0);
        spring.step(f32::NAN);
        assert_eq!(spring.value(), 3.0);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(10.0);
        spring.step(2.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 10.0).abs() < 0.1);
    }
}
