//! Process-wide theme context
//!
//! The provider (the host app) installs one [`ThemeContext`] at startup.
//! Pages read it through [`ThemeContext::current`] and never write to it.
//! The effective scheme is resolved on every read, so a `System` preference
//! follows the environment without any cache to invalidate.

use crate::error::{Result, ThemeError};
use crate::platform::{ColorSchemeSource, Unavailable};
use crate::theme::{resolve_scheme, ColorScheme, ThemePreference};
use crate::tokens::Palette;
use std::sync::{Arc, OnceLock};

/// Global theme context instance
static THEME_CONTEXT: OnceLock<ThemeContext> = OnceLock::new();

/// Read-only theme context: a preference plus the environment to resolve it
#[derive(Clone)]
pub struct ThemeContext {
    preference: ThemePreference,
    environment: Arc<dyn ColorSchemeSource>,
}

impl ThemeContext {
    pub fn new(preference: ThemePreference, environment: Arc<dyn ColorSchemeSource>) -> Self {
        Self {
            preference,
            environment,
        }
    }

    /// A context for hosts without a color-scheme signal
    pub fn without_environment(preference: ThemePreference) -> Self {
        Self::new(preference, Arc::new(Unavailable))
    }

    /// Install the process-wide context (once, at startup)
    pub fn install(self) -> Result<&'static ThemeContext> {
        let preference = self.preference;
        THEME_CONTEXT
            .set(self)
            .map_err(|_| ThemeError::AlreadyInstalled)?;
        tracing::debug!(%preference, "theme context installed");
        THEME_CONTEXT.get().ok_or(ThemeError::AlreadyInstalled)
    }

    /// The installed context, if any
    pub fn try_current() -> Option<&'static ThemeContext> {
        THEME_CONTEXT.get()
    }

    /// The installed context, or a light-mode context when none is installed
    pub fn current() -> ThemeContext {
        Self::try_current()
            .cloned()
            .unwrap_or_else(|| Self::without_environment(ThemePreference::Light))
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Effective scheme, resolved now
    pub fn scheme(&self) -> ColorScheme {
        resolve_scheme(self.preference, self.environment.as_ref())
    }

    pub fn is_dark(&self) -> bool {
        self.scheme().is_dark()
    }

    /// Palette for the effective scheme
    pub fn palette(&self) -> &'static Palette {
        Palette::for_scheme(self.scheme())
    }

    /// Pick between a light and a dark value for the effective scheme
    pub fn pick<T>(&self, light: T, dark: T) -> T {
        if self.is_dark() {
            dark
        } else {
            light
        }
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("preference", &self.preference)
            .field("scheme", &self.scheme())
            .finish()
    }
}
