//! Page elements
//!
//! A page is a vertical stack of [`Node`]s. Each node wraps one element,
//! which is either static content or one of the interactive primitives.
//! Nodes carry their layout bounds and the event target their listeners
//! are registered under.

use crate::contact::{ContactForm, FormPhase};
use crate::page::PageContext;
use crate::route::{AssetLink, SiteAction};
use attest_core::Rect;
use attest_theme::{ColorScheme, ThemeContext};
use attest_widgets::{
    PointerPhase, PointerTransform, Reveal, RotatingText, ScrollTracker, ScrollTransforms,
    SelectionPanel, TypingPhase, TypingText,
};
use serde::Serialize;

/// Average glyph advance used to estimate wrapped text height
const GLYPH_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 24.0;
const PANEL_PADDING: f32 = 32.0;

pub enum Element {
    Heading(String),
    Paragraph(String),
    /// Scroll-linked hero that fades and drifts as it leaves
    Parallax {
        text: String,
        tracker: ScrollTracker,
        transforms: ScrollTransforms,
    },
    Rotating(RotatingText),
    Typing(TypingText),
    Reveal {
        text: String,
        reveal: Reveal,
    },
    /// Tabs, phase switchers and accordions
    Selection {
        labels: Vec<String>,
        details: Vec<String>,
        panel: SelectionPanel,
    },
    /// Tilt card or magnetic button
    Card {
        label: String,
        transform: PointerTransform,
        action: Option<SiteAction>,
    },
    Button {
        label: String,
        action: SiteAction,
    },
    Asset(AssetLink),
    Form(ContactForm),
    /// Decorative particles colored from the active palette
    Particles {
        count: usize,
    },
}

impl Element {
    /// The interactive primitive behind this element, if any
    pub fn primitive(&self) -> Option<&'static str> {
        match self {
            Element::Parallax { .. } => Some("scroll-progress"),
            Element::Rotating(_) => Some("rotating-text"),
            Element::Typing(_) => Some("typing-text"),
            Element::Reveal { .. } => Some("reveal"),
            Element::Selection { .. } => Some("selection-panel"),
            Element::Card { .. } => Some("pointer-transform"),
            Element::Particles { .. } => Some("theme"),
            _ => None,
        }
    }
}

/// Estimated laid-out height of `text` wrapped to `width`
pub fn measure_text_height(text: &str, width: f32) -> f32 {
    let per_line = (width / GLYPH_WIDTH).floor().max(1.0);
    let lines = (text.chars().count() as f32 / per_line).ceil().max(1.0);
    lines * LINE_HEIGHT + PANEL_PADDING
}

/// An element placed on the page
pub struct Node {
    pub id: &'static str,
    /// Event target for pointer listeners
    pub target: u64,
    pub bounds: Rect,
    /// Takes the viewport's height instead of a fixed one
    pub(crate) fills_viewport: bool,
    pub element: Element,
}

impl Node {
    /// Attach listeners and start timers
    pub(crate) fn mount(&mut self, ctx: &PageContext) {
        match &mut self.element {
            Element::Parallax { tracker, .. } => tracker.attach(&ctx.dispatcher, ctx.viewport),
            Element::Rotating(text) => text.mount(&ctx.scheduler),
            Element::Typing(text) => text.mount(&ctx.scheduler),
            Element::Reveal { reveal, .. } => reveal.mount(&ctx.dispatcher, ctx.viewport),
            Element::Card { transform, .. } => transform.attach(&ctx.dispatcher, self.target),
            Element::Selection { details, panel, .. } => {
                for (i, detail) in details.iter().enumerate() {
                    panel.set_content_height(i, measure_text_height(detail, self.bounds.width));
                }
            }
            _ => {}
        }
    }

    /// Move to `bounds` after the viewport changed size
    pub(crate) fn relayout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        match &mut self.element {
            Element::Parallax { tracker, .. } => tracker.set_container(bounds),
            Element::Reveal { reveal, .. } => reveal.set_element(bounds),
            Element::Card { transform, .. } => transform.set_bounds(bounds),
            Element::Selection { details, panel, .. } => {
                for (i, detail) in details.iter().enumerate() {
                    panel.set_content_height(i, measure_text_height(detail, bounds.width));
                }
            }
            _ => {}
        }
    }

    /// Advance frame-driven animations by `dt_ms`
    pub(crate) fn tick(&mut self, dt_ms: f32) {
        let dt_secs = dt_ms / 1000.0;
        match &mut self.element {
            Element::Rotating(text) => text.tick(dt_ms),
            Element::Reveal { reveal, .. } => {
                reveal.tick(dt_ms);
            }
            Element::Selection { panel, .. } => {
                panel.tick(dt_secs);
            }
            Element::Card { transform, .. } => {
                transform.tick(dt_secs);
            }
            _ => {}
        }
    }

    /// Text a reader would currently see
    pub fn visible_text(&self) -> Vec<String> {
        match &self.element {
            Element::Heading(text) | Element::Paragraph(text) => vec![text.clone()],
            Element::Parallax { text, .. } => vec![text.clone()],
            Element::Rotating(rotating) => rotating.current().into_iter().collect(),
            Element::Typing(typing) => {
                let text = typing.text();
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text]
                }
            }
            Element::Reveal { text, reveal } => {
                if reveal.is_revealed() {
                    vec![text.clone()]
                } else {
                    Vec::new()
                }
            }
            Element::Selection {
                labels,
                details,
                panel,
            } => {
                let mut out = labels.clone();
                if let Some(detail) = panel.active().and_then(|i| details.get(i)) {
                    out.push(detail.clone());
                }
                out
            }
            Element::Card { label, .. } | Element::Button { label, .. } => vec![label.clone()],
            Element::Asset(link) => vec![link.label.clone()],
            Element::Form(form) => vec![form.status_text().to_string()],
            Element::Particles { .. } => Vec::new(),
        }
    }

    pub fn snapshot(&self, theme: &ThemeContext) -> ElementSnapshot {
        ElementSnapshot {
            id: self.id.to_string(),
            state: self.state(theme),
            text: self.visible_text(),
        }
    }

    fn state(&self, theme: &ThemeContext) -> ElementState {
        match &self.element {
            Element::Heading(_) | Element::Paragraph(_) => ElementState::Static,
            Element::Parallax {
                tracker,
                transforms,
                ..
            } => {
                let progress = tracker.progress();
                let visual = transforms.sample(progress);
                ElementState::Parallax {
                    progress,
                    opacity: visual.opacity,
                    scale: visual.scale,
                    translate_y: visual.translate_y,
                }
            }
            Element::Rotating(text) => ElementState::RotatingText {
                index: text.index(),
                exiting: text.exiting(),
            },
            Element::Typing(text) => ElementState::TypingText {
                index: text.index(),
                phase: text.phase(),
                caret: text.caret_visible(),
            },
            Element::Reveal { reveal, .. } => {
                let visual = reveal.value();
                ElementState::Reveal {
                    revealed: reveal.is_revealed(),
                    enter_count: reveal.enter_count(),
                    opacity: visual.opacity,
                    translate_y: visual.translate_y,
                }
            }
            Element::Selection { panel, .. } => ElementState::Selection {
                active: panel.active(),
                panel_height: panel
                    .active()
                    .and_then(|i| panel.panel(i))
                    .map(|p| p.height()),
            },
            Element::Card { transform, .. } => {
                let (rotate_x, rotate_y) = transform.rotation();
                let (translate_x, translate_y) = transform.translation();
                ElementState::Card {
                    phase: transform.phase(),
                    rotate_x,
                    rotate_y,
                    translate_x,
                    translate_y,
                }
            }
            Element::Button { action, .. } => ElementState::Button {
                action: action.clone(),
            },
            Element::Asset(link) => ElementState::Asset {
                path: link.path.clone(),
            },
            Element::Form(form) => ElementState::Form {
                phase: form.phase(),
                submissions: form.submissions(),
            },
            Element::Particles { count } => {
                let palette = theme.palette();
                ElementState::Particles {
                    scheme: theme.scheme(),
                    count: *count,
                    colors: palette.particles.iter().map(ToString::to_string).collect(),
                }
            }
        }
    }
}

/// Serializable state of one element
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementState {
    Static,
    Parallax {
        progress: f32,
        opacity: f32,
        scale: f32,
        translate_y: f32,
    },
    RotatingText {
        index: usize,
        /// Entry still leaving after a swap
        exiting: Option<String>,
    },
    TypingText {
        index: usize,
        phase: TypingPhase,
        caret: bool,
    },
    Reveal {
        revealed: bool,
        enter_count: u32,
        opacity: f32,
        translate_y: f32,
    },
    Selection {
        active: Option<usize>,
        panel_height: Option<f32>,
    },
    Card {
        phase: PointerPhase,
        rotate_x: f32,
        rotate_y: f32,
        translate_x: f32,
        translate_y: f32,
    },
    Button {
        action: SiteAction,
    },
    Asset {
        path: String,
    },
    Form {
        phase: FormPhase,
        submissions: u32,
    },
    Particles {
        scheme: ColorScheme,
        count: usize,
        colors: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub id: String,
    #[serde(flatten)]
    pub state: ElementState,
    pub text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_text_height_wraps() {
        let one_line = measure_text_height("short", 800.0);
        assert_eq!(one_line, LINE_HEIGHT + PANEL_PADDING);
        let long = "x".repeat(250);
        assert_eq!(measure_text_height(&long, 800.0), 3.0 * LINE_HEIGHT + PANEL_PADDING);
        assert!(measure_text_height("", 0.0) > 0.0);
    }
}
