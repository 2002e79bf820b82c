//! Attest Core Runtime
//!
//! Foundational primitives shared by every interactive piece of the site:
//!
//! - **Events**: Pointer and viewport events routed to per-target listeners
//! - **State Machines**: Typed state machines for widget interaction states
//! - **Timers**: A virtual-clock timer queue with scoped (RAII) timers
//! - **Geometry**: Points, sizes, rectangles and the viewport
//!
//! # Example
//!
//! ```rust
//! use attest_core::timer::Scheduler;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let scheduler = Scheduler::new();
//! let ticks = Arc::new(AtomicU32::new(0));
//! let counter = ticks.clone();
//!
//! let guard = scheduler
//!     .handle()
//!     .interval(100, move |_| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//!
//! scheduler.advance(350);
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//!
//! // Dropping the guard cancels the timer
//! drop(guard);
//! scheduler.advance(1000);
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod sync;
pub mod timer;

pub use events::{Event, EventData, EventDispatcher, EventType, Subscription};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Point, Rect, Size, Viewport};
pub use timer::{Reschedule, Scheduler, SchedulerHandle, TimerGuard, TimerId};
