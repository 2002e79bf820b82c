//! Attest Site Pages
//!
//! The seven pages of the Attest site (Home, About, Contact, Platform,
//! Partners, Resources and Solutions) as compositions of the interactive
//! primitives in `attest_widgets`. Pages hold no state of their own beyond
//! their primitives and the contact form.
//!
//! ```rust
//! use attest_core::{EventDispatcher, Scheduler};
//! use attest_pages::{Page, PageContext, Route, SiteAction};
//!
//! let scheduler = Scheduler::new();
//! let ctx = PageContext::new(EventDispatcher::new(), scheduler.handle());
//! let mut home = Page::mount(Route::Home, ctx);
//!
//! let action = home.click("get-started", None).unwrap();
//! assert_eq!(action, Some(SiteAction::navigate(Route::Contact)));
//! ```

pub mod contact;
pub mod element;
pub mod error;
pub mod page;
pub mod route;
pub mod site;

pub use contact::{ContactForm, FormField, FormFields, FormPhase, DEFAULT_SUBMIT_DELAY_MS};
pub use element::{Element, ElementSnapshot, ElementState, Node};
pub use error::{FormError, PageError, Result};
pub use page::{Page, PageBuilder, PageContext, PageSnapshot};
pub use route::{AssetLink, Route, SiteAction};
