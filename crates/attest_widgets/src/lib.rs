//! Attest Interactive Primitives
//!
//! The stateful building blocks every page composes:
//!
//! - **Scroll progress**: [`ScrollTracker`] and the [`MotionTransform`]s
//!   derived from it (hero fade, parallax)
//! - **Reveal**: [`Reveal`] plays an entry transition the first time an
//!   element becomes visible
//! - **Rotating and typing text**: [`RotatingText`] and [`TypingText`]
//!   cycle through strings on the shared timer queue
//! - **Selection panels**: [`SelectionPanel`] for tabs, phase switchers and
//!   accordions, with spring-animated detail panels
//! - **Pointer transforms**: [`PointerTransform`] for tilt and magnetic
//!   hover effects
//!
//! Widgets are headless. Hosts feed them viewport and pointer events
//! through an [`EventDispatcher`](attest_core::EventDispatcher), advance the
//! [`Scheduler`](attest_core::Scheduler) for timers and tick the frame-driven
//! animations, then read the visual state back out. Dropping a widget
//! removes its listeners and cancels its timers.
//!
//! # Example
//!
//! ```rust
//! use attest_core::Scheduler;
//! use attest_widgets::{RotatingText, RotatingTextConfig};
//!
//! let scheduler = Scheduler::new();
//! let mut headline = RotatingText::new(
//!     ["Trust.", "Govern.", "Certify."],
//!     RotatingTextConfig::default().interval(2500),
//! );
//! headline.mount(&scheduler.handle());
//!
//! scheduler.advance(2500);
//! assert_eq!(headline.current().as_deref(), Some("Govern."));
//! ```

pub mod error;
pub mod motion;
pub mod pointer;
pub mod reveal;
pub mod rotating;
pub mod scroll;
pub mod selection;
pub mod typing;

pub use error::{Result, WidgetError};
pub use motion::Motion;
pub use pointer::{PointerConfig, PointerOffset, PointerPhase, PointerTransform};
pub use reveal::{Reveal, RevealConfig};
pub use rotating::{RotatingText, RotatingTextConfig, SplitBy, TextUnit};
pub use scroll::{
    scroll_progress, MotionTransform, OffsetPair, ScrollOffset, ScrollOffsets, ScrollTracker,
    ScrollTransforms,
};
pub use selection::{ActiveIndex, Collapse, SelectionMode, SelectionPanel};
pub use typing::{TypingConfig, TypingPhase, TypingText};
