//! Selection panels: tabs, phase switchers and accordions
//!
//! A [`SelectionPanel`] holds at most one active index into a fixed list.
//! In [`SelectionMode::Tabs`] selecting an item always makes it active; in
//! [`SelectionMode::Accordion`] selecting the open item closes it. Either
//! way two items are never active at once and the most recent selection
//! wins.
//!
//! Every item's detail panel owns a [`Collapse`] that springs its height
//! and opacity between closed and the measured content height.

use crate::motion::Motion;
use attest_animation::{Spring, SpringConfig};
use attest_core::events::event_types;
use attest_core::Event;
use serde::{Deserialize, Serialize};

/// The selected item, if any
pub type ActiveIndex = Option<usize>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one item stays selected once something is selected
    #[default]
    Tabs,
    /// Selecting the open item closes it
    Accordion,
}

/// Height and opacity springs for one detail panel
#[derive(Clone, Debug)]
pub struct Collapse {
    height: Spring,
    opacity: Spring,
    content_height: f32,
    expanded: bool,
}

impl Collapse {
    pub fn new(content_height: f32, expanded: bool, config: SpringConfig) -> Self {
        let content_height = sanitize_height(content_height);
        let (height, opacity) = if expanded { (content_height, 1.0) } else { (0.0, 0.0) };
        Self {
            height: Spring::new(config, height),
            opacity: Spring::new(config, opacity),
            content_height,
            expanded,
        }
    }

    pub fn expand(&mut self) {
        self.expanded = true;
        self.height.set_target(self.content_height);
        self.opacity.set_target(1.0);
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
        self.height.set_target(0.0);
        self.opacity.set_target(0.0);
    }

    /// Jump to the current target without animating
    pub fn snap(&mut self) {
        self.height.snap_to(self.height.target());
        self.opacity.snap_to(self.opacity.target());
    }

    /// Re-measure the content; an open panel springs to the new height
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = sanitize_height(height);
        if self.expanded {
            self.height.set_target(self.content_height);
        }
    }

    /// Advance by `dt` seconds; returns true while still moving
    pub fn tick(&mut self, dt: f32) -> bool {
        self.height.step(dt);
        self.opacity.step(dt);
        !self.is_settled()
    }

    pub fn height(&self) -> f32 {
        self.height.value().max(0.0)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_settled(&self) -> bool {
        self.height.is_settled() && self.opacity.is_settled()
    }
}

fn sanitize_height(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}

/// Single-selection state over a fixed list of items
#[derive(Clone, Debug)]
pub struct SelectionPanel {
    mode: SelectionMode,
    initial: ActiveIndex,
    active: ActiveIndex,
    panels: Vec<Collapse>,
    motion: Motion,
    spring: SpringConfig,
}

impl SelectionPanel {
    /// A panel over `len` items; an out-of-range `initial` starts closed
    pub fn new(mode: SelectionMode, len: usize, initial: ActiveIndex) -> Self {
        let initial = match initial {
            Some(i) if i >= len => {
                tracing::warn!(index = i, len, "initial selection out of range, starting closed");
                None
            }
            other => other,
        };
        let spring = SpringConfig::gentle();
        Self {
            mode,
            initial,
            active: initial,
            panels: (0..len)
                .map(|i| Collapse::new(0.0, initial == Some(i), spring))
                .collect(),
            motion: Motion::Full,
            spring,
        }
    }

    /// Tabs with the first item selected
    pub fn tabs(len: usize) -> Self {
        Self::new(SelectionMode::Tabs, len, (len > 0).then_some(0))
    }

    /// An accordion with every item closed
    pub fn accordion(len: usize) -> Self {
        Self::new(SelectionMode::Accordion, len, None)
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Spring used by the detail panels
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        let active = self.active;
        for (i, panel) in self.panels.iter_mut().enumerate() {
            *panel = Collapse::new(panel.content_height(), active == Some(i), spring);
        }
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn active(&self) -> ActiveIndex {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Click on item `index`; out-of-range indices change nothing
    pub fn select(&mut self, index: usize) -> ActiveIndex {
        if index >= self.len() {
            tracing::warn!(index, len = self.len(), "selection index out of range, ignoring");
            return self.active;
        }
        let next = match self.mode {
            SelectionMode::Accordion if self.active == Some(index) => None,
            _ => Some(index),
        };
        self.set_active(next);
        self.active
    }

    /// Hover over item `index`; selects in tab mode, ignored by accordions
    pub fn hover(&mut self, index: usize) -> ActiveIndex {
        match self.mode {
            SelectionMode::Tabs => self.select(index),
            SelectionMode::Accordion => self.active,
        }
    }

    /// Close the open item (accordions only)
    pub fn close(&mut self) {
        if self.mode == SelectionMode::Accordion {
            self.set_active(None);
        }
    }

    /// Back to the initial selection, as on remount
    pub fn reset(&mut self) {
        self.set_active(self.initial);
        for panel in &mut self.panels {
            panel.snap();
        }
    }

    /// Route a pointer event aimed at item `index`
    pub fn handle_event(&mut self, index: usize, event: &Event) {
        match event.event_type {
            event_types::CLICK => {
                self.select(index);
            }
            event_types::POINTER_ENTER => {
                self.hover(index);
            }
            _ => {}
        }
    }

    fn set_active(&mut self, next: ActiveIndex) {
        if next == self.active {
            return;
        }
        if let Some(panel) = self.active.and_then(|i| self.panels.get_mut(i)) {
            panel.collapse();
        }
        if let Some(panel) = next.and_then(|i| self.panels.get_mut(i)) {
            panel.expand();
        }
        tracing::debug!(from = ?self.active, to = ?next, "selection changed");
        self.active = next;

        if self.motion.is_reduced() {
            for panel in &mut self.panels {
                panel.snap();
            }
        }
    }

    /// Measured content height of item `index`
    pub fn set_content_height(&mut self, index: usize, height: f32) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.set_content_height(height);
            if self.motion.is_reduced() {
                panel.snap();
            }
        }
    }

    pub fn panel(&self, index: usize) -> Option<&Collapse> {
        self.panels.get(index)
    }

    /// Advance every panel by `dt` seconds; returns true while any moves
    pub fn tick(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for panel in &mut self.panels {
            animating |= panel.tick(dt);
        }
        animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(panel: &mut SelectionPanel) {
        for _ in 0..600 {
            if !panel.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_tabs_most_recent_click_wins() {
        let mut tabs = SelectionPanel::tabs(4);
        assert_eq!(tabs.active(), Some(0));

        for &i in &[2, 2, 1, 3, 0] {
            tabs.select(i);
            assert_eq!(tabs.active(), Some(i));
            assert_eq!((0..4).filter(|&j| tabs.is_active(j)).count(), 1);
        }
    }

    #[test]
    fn test_accordion_toggles_and_switches() {
        let mut accordion = SelectionPanel::accordion(3);
        assert_eq!(accordion.active(), None);
        assert_eq!(accordion.select(1), Some(1));
        assert_eq!(accordion.select(2), Some(2));
        assert_eq!(accordion.select(2), None);
        accordion.select(0);
        accordion.close();
        assert_eq!(accordion.active(), None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut tabs = SelectionPanel::tabs(2);
        tabs.select(1);
        assert_eq!(tabs.select(5), Some(1));

        let empty = SelectionPanel::tabs(0);
        assert_eq!(empty.active(), None);

        let clamped = SelectionPanel::new(SelectionMode::Tabs, 2, Some(9));
        assert_eq!(clamped.active(), None);
    }

    #[test]
    fn test_hover_selects_tabs_only() {
        let mut tabs = SelectionPanel::tabs(3);
        tabs.handle_event(2, &Event::pointer(event_types::POINTER_ENTER, 7, 0.0, 0.0));
        assert_eq!(tabs.active(), Some(2));

        let mut accordion = SelectionPanel::accordion(3);
        accordion.handle_event(2, &Event::pointer(event_types::POINTER_ENTER, 7, 0.0, 0.0));
        assert_eq!(accordion.active(), None);
        accordion.handle_event(2, &Event::pointer(event_types::CLICK, 7, 0.0, 0.0));
        assert_eq!(accordion.active(), Some(2));
    }

    #[test]
    fn test_panels_spring_to_measured_height() {
        let mut accordion = SelectionPanel::accordion(2);
        accordion.set_content_height(0, 240.0);
        accordion.select(0);

        accordion.tick(1.0 / 60.0);
        let opening = accordion.panel(0).map(Collapse::height).unwrap_or_default();
        assert!(opening > 0.0 && opening < 240.0);

        settle(&mut accordion);
        let panel = accordion.panel(0).unwrap();
        assert!((panel.height() - 240.0).abs() < 0.5);
        assert!((panel.opacity() - 1.0).abs() < 0.01);

        // Content grows while open
        accordion.set_content_height(0, 300.0);
        settle(&mut accordion);
        assert!((accordion.panel(0).unwrap().height() - 300.0).abs() < 0.5);

        accordion.select(0);
        settle(&mut accordion);
        assert!(accordion.panel(0).unwrap().height() < 0.5);
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let mut tabs = SelectionPanel::tabs(2).with_motion(Motion::Reduced);
        tabs.set_content_height(1, 120.0);
        tabs.select(1);
        assert_eq!(tabs.panel(1).unwrap().height(), 120.0);
        assert_eq!(tabs.panel(0).unwrap().opacity(), 0.0);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut tabs = SelectionPanel::tabs(3);
        tabs.select(2);
        tabs.reset();
        assert_eq!(tabs.active(), Some(0));
    }
}
