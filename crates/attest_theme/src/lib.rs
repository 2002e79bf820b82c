//! Attest Theme System
//!
//! Resolves the user's display preference (`light`, `dark` or `system`) into
//! an effective color scheme and exposes palette tokens for it.
//!
//! # Overview
//!
//! - **Preference**: [`ThemePreference`] is chosen by the host at startup
//! - **Resolution**: [`resolve_is_dark`] is a pure function of the preference
//!   and a [`ColorSchemeSource`]; it never fails, falling back to light when
//!   the environment cannot answer
//! - **Context**: [`ThemeContext`] is the read-only, process-wide value that
//!   pages read through a narrow accessor
//! - **Watcher**: [`SchemeWatcher`] lets the few consumers that need live
//!   updates poll the environment on the timer queue
//!
//! # Quick Start
//!
//! ```rust
//! use attest_theme::{resolve_is_dark, FixedScheme, ColorScheme, ThemePreference};
//!
//! let env = FixedScheme(ColorScheme::Dark);
//! assert!(resolve_is_dark(ThemePreference::System, &env));
//! assert!(!resolve_is_dark(ThemePreference::Light, &env));
//! ```

pub mod error;
pub mod platform;
pub mod state;
pub mod theme;
pub mod tokens;
pub mod watcher;

pub use error::{Result, ThemeError};
pub use platform::{ColorSchemeSource, EnvColorScheme, FixedScheme, Unavailable};
pub use state::ThemeContext;
pub use theme::{resolve_is_dark, resolve_scheme, ColorScheme, ThemePreference};
pub use tokens::{Color, Palette};
pub use watcher::SchemeWatcher;
