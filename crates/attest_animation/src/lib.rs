//! Attest Animation System
//!
//! Spring physics, easing curves, range mapping and tweened visual states.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Easing**: CSS-compatible curves including arbitrary cubic beziers
//! - **Range Mapping**: Piecewise mapping of a driver value (scroll progress)
//!   onto an output range, the basis of parallax and fade effects
//! - **Tweens**: Timed transitions between two visual states
//! - **Stagger**: Per-unit delays for cascading reveals
//! - **Interruptible**: Springs keep their velocity when retargeted

pub mod easing;
pub mod interpolate;
pub mod spring;
pub mod stagger;
pub mod tween;

pub use easing::Easing;
pub use interpolate::RangeMap;
pub use spring::{Spring, SpringConfig};
pub use stagger::{Stagger, StaggerFrom};
pub use tween::{Tween, VisualState};
