//! Environment color-scheme sources
//!
//! The environment's preferred color scheme is read through
//! [`ColorSchemeSource`]. Hosts that can query it (a browser's
//! `prefers-color-scheme`, a desktop setting) implement the trait; contexts
//! that cannot (server-side rendering, tests) use [`Unavailable`] or
//! [`FixedScheme`].

use crate::theme::ColorScheme;

/// Environment variable consulted first by [`EnvColorScheme`]
pub const SCHEME_VAR: &str = "ATTEST_COLOR_SCHEME";

/// Read access to the environment's preferred color scheme
pub trait ColorSchemeSource: Send + Sync {
    /// The preferred scheme, or `None` if the environment cannot say
    fn query(&self) -> Option<ColorScheme>;
}

/// An environment that always reports the same scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedScheme(pub ColorScheme);

impl ColorSchemeSource for FixedScheme {
    fn query(&self) -> Option<ColorScheme> {
        Some(self.0)
    }
}

/// An environment without a color-scheme signal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unavailable;

impl ColorSchemeSource for Unavailable {
    fn query(&self) -> Option<ColorScheme> {
        None
    }
}

impl<F> ColorSchemeSource for F
where
    F: Fn() -> Option<ColorScheme> + Send + Sync,
{
    fn query(&self) -> Option<ColorScheme> {
        self()
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the scheme from process environment variables
///
/// `ATTEST_COLOR_SCHEME=dark|light` wins; otherwise a `GTK_THEME` with a
/// `:dark` variant (or a name ending in `-dark`) reports dark, and any other
/// `GTK_THEME` reports light. With neither set the scheme is unknown.
pub struct EnvColorScheme {
    lookup: Lookup,
}

impl EnvColorScheme {
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Use a custom variable lookup instead of the process environment
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl Default for EnvColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSource for EnvColorScheme {
    fn query(&self) -> Option<ColorScheme> {
        if let Some(value) = (self.lookup)(SCHEME_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "dark" => return Some(ColorScheme::Dark),
                "light" => return Some(ColorScheme::Light),
                other => {
                    tracing::debug!(value = other, "ignoring unrecognised {SCHEME_VAR}");
                }
            }
        }

        let gtk = (self.lookup)("GTK_THEME")?;
        let gtk = gtk.to_ascii_lowercase();
        if gtk.ends_with(":dark") || gtk.ends_with("-dark") {
            Some(ColorScheme::Dark)
        } else {
            Some(ColorScheme::Light)
        }
    }
}

impl std::fmt::Debug for EnvColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvColorScheme").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> EnvColorScheme {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvColorScheme::with_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_explicit_variable_wins() {
        let source = env(&[(SCHEME_VAR, "Dark"), ("GTK_THEME", "Adwaita")]);
        assert_eq!(source.query(), Some(ColorScheme::Dark));
    }

    #[test]
    fn test_gtk_theme_variants() {
        assert_eq!(env(&[("GTK_THEME", "Adwaita:dark")]).query(), Some(ColorScheme::Dark));
        assert_eq!(env(&[("GTK_THEME", "Yaru-dark")]).query(), Some(ColorScheme::Dark));
        assert_eq!(env(&[("GTK_THEME", "Adwaita")]).query(), Some(ColorScheme::Light));
    }

    #[test]
    fn test_unrecognised_value_falls_through() {
        let source = env(&[(SCHEME_VAR, "purple")]);
        assert_eq!(source.query(), None);
    }

    #[test]
    fn test_closure_source() {
        let source = || Some(ColorScheme::Dark);
        assert_eq!(source.query(), Some(ColorScheme::Dark));
    }
}
