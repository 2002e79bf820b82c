//! Theme preference and effective color scheme

use crate::error::ThemeError;
use crate::platform::ColorSchemeSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effective color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's chosen display mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the environment's preferred color scheme
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" | "auto" => Ok(ThemePreference::System),
            _ => Err(ThemeError::InvalidPreference(s.to_string())),
        }
    }
}

/// Resolve a preference into an effective scheme
///
/// `System` asks `env` at call time; an environment that cannot answer
/// resolves to light. Nothing is cached.
pub fn resolve_scheme(preference: ThemePreference, env: &dyn ColorSchemeSource) -> ColorScheme {
    match preference {
        ThemePreference::Light => ColorScheme::Light,
        ThemePreference::Dark => ColorScheme::Dark,
        ThemePreference::System => env.query().unwrap_or_default(),
    }
}

/// `true` when the effective scheme is dark
pub fn resolve_is_dark(preference: ThemePreference, env: &dyn ColorSchemeSource) -> bool {
    resolve_scheme(preference, env).is_dark()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedScheme, Unavailable};

    #[test]
    fn test_explicit_preferences_ignore_environment() {
        for env in [FixedScheme(ColorScheme::Light), FixedScheme(ColorScheme::Dark)] {
            assert!(!resolve_is_dark(ThemePreference::Light, &env));
            assert!(resolve_is_dark(ThemePreference::Dark, &env));
        }
        assert!(resolve_is_dark(ThemePreference::Dark, &Unavailable));
    }

    #[test]
    fn test_system_follows_environment() {
        assert!(resolve_is_dark(ThemePreference::System, &FixedScheme(ColorScheme::Dark)));
        assert!(!resolve_is_dark(ThemePreference::System, &FixedScheme(ColorScheme::Light)));
    }

    #[test]
    fn test_system_without_environment_is_light() {
        assert!(!resolve_is_dark(ThemePreference::System, &Unavailable));
    }

    #[test]
    fn test_preference_parsing() {
        assert_eq!("Dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!(" system ".parse::<ThemePreference>(), Ok(ThemePreference::System));
        assert_eq!(
            "sepia".parse::<ThemePreference>(),
            Err(ThemeError::InvalidPreference("sepia".to_string()))
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ColorScheme::Light.toggle(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggle().toggle(), ColorScheme::Dark);
    }

    #[test]
    fn test_preference_in_config_files() {
        #[derive(Deserialize)]
        struct Section {
            preference: ThemePreference,
        }

        let section: Section = toml::from_str("preference = \"dark\"").unwrap();
        assert_eq!(section.preference, ThemePreference::Dark);
        assert!(toml::from_str::<Section>("preference = \"sepia\"").is_err());

        assert_eq!(serde_json::to_string(&ThemePreference::System).unwrap(), "\"system\"");
        assert_eq!(
            serde_json::from_str::<ColorScheme>("\"light\"").unwrap(),
            ColorScheme::Light
        );
    }
}
