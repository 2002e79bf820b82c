//! Scenario definition for headless page runs

use anyhow::{Context, Result};
use attest_pages::{FormField, Route, SiteAction};
use attest_theme::ColorScheme;
use serde::Deserialize;
use std::path::Path;

/// A page and the steps to drive it through
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_page")]
    pub page: Route,
    /// Scheme the simulated environment reports at start
    #[serde(default)]
    pub system_scheme: Option<ColorScheme>,
    pub steps: Vec<ScenarioStep>,
}

fn default_page() -> Route {
    Route::Home
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Advance the clock by `ms`, one frame at a time
    Wait { ms: u64 },
    Tick { frames: u32 },
    Click {
        id: String,
        #[serde(default)]
        item: Option<usize>,
    },
    Hover {
        id: String,
        #[serde(default)]
        item: Option<usize>,
    },
    /// Pointer at `(x, y)` relative to the element
    Pointer { id: String, x: f32, y: f32 },
    PointerLeave { id: String },
    Scroll { y: f32 },
    ScrollTo { id: String },
    Resize { width: f32, height: f32 },
    Fill {
        id: String,
        field: FormField,
        value: String,
    },
    Submit { id: String },
    /// Flip the simulated environment's color scheme
    SystemScheme { scheme: ColorScheme },
    /// Without an `id` the whole page is searched
    AssertTextContains {
        #[serde(default)]
        id: Option<String>,
        value: String,
    },
    AssertActive { id: String, index: Option<usize> },
    AssertLastAction { expected: SiteAction },
    AssertScheme { scheme: ColorScheme },
}

impl ScenarioStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Click { .. } => "click",
            ScenarioStep::Hover { .. } => "hover",
            ScenarioStep::Pointer { .. } => "pointer",
            ScenarioStep::PointerLeave { .. } => "pointer_leave",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::ScrollTo { .. } => "scroll_to",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Fill { .. } => "fill",
            ScenarioStep::Submit { .. } => "submit",
            ScenarioStep::SystemScheme { .. } => "system_scheme",
            ScenarioStep::AssertTextContains { .. } => "assert_text_contains",
            ScenarioStep::AssertActive { .. } => "assert_active",
            ScenarioStep::AssertLastAction { .. } => "assert_last_action",
            ScenarioStep::AssertScheme { .. } => "assert_scheme",
        }
    }
}
