//! Rotating text
//!
//! Cycles through a list of strings, one at a time, advancing every
//! interval and wrapping to the first after the last. The displayed entry
//! is split into units (characters, words or lines) that enter one after
//! another with a stagger delay, while the units of the entry it replaced
//! leave with the same stagger. An `instant` config (or reduced motion)
//! cuts straight to the new entry.
//!
//! The rotation runs on the shared timer queue. The widget owns its timer
//! guard, so dropping the widget cancels the rotation; a timer that fires
//! after the widget's state is gone does nothing.

use crate::error::{Result, WidgetError};
use crate::motion::Motion;
use attest_animation::{Easing, Stagger, StaggerFrom, VisualState};
use attest_core::sync::lock;
use attest_core::{Reschedule, SchedulerHandle, TimerGuard};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// How the displayed entry is split into animated units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitBy {
    #[default]
    Characters,
    Words,
    Lines,
}

impl FromStr for SplitBy {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" | "chars" => Ok(SplitBy::Characters),
            "words" => Ok(SplitBy::Words),
            "lines" => Ok(SplitBy::Lines),
            _ => Err(WidgetError::InvalidSplit(s.to_string())),
        }
    }
}

impl SplitBy {
    pub fn split<'a>(&self, text: &'a str) -> SmallVec<[&'a str; 16]> {
        match self {
            SplitBy::Characters => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
            SplitBy::Words => text.split_whitespace().collect(),
            SplitBy::Lines => text.lines().collect(),
        }
    }
}

/// Rotating text configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatingTextConfig {
    /// Time each entry is displayed
    pub interval_ms: u64,
    pub split_by: SplitBy,
    /// Delay between consecutive units entering
    pub stagger_ms: f32,
    pub stagger_from: StaggerFrom,
    /// Duration of one unit's entry transition
    pub transition_ms: u32,
    pub easing: Easing,
    /// Advance on the timer; when false only manual navigation moves it
    pub auto: bool,
    /// Wrap after the last entry; when false the rotation stops there
    pub looped: bool,
    /// Swap entries without exit or entry transitions
    pub instant: bool,
}

impl Default for RotatingTextConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            split_by: SplitBy::Characters,
            stagger_ms: 25.0,
            stagger_from: StaggerFrom::Last,
            transition_ms: 300,
            easing: Easing::EaseOut,
            auto: true,
            looped: true,
            instant: false,
        }
    }
}

impl RotatingTextConfig {
    pub fn interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32, from: StaggerFrom) -> Self {
        self.stagger_ms = stagger_ms;
        self.stagger_from = from;
        self
    }

    pub fn manual(mut self) -> Self {
        self.auto = false;
        self
    }

    pub fn single_pass(mut self) -> Self {
        self.looped = false;
        self
    }

    pub fn instant(mut self) -> Self {
        self.instant = true;
        self
    }
}

/// One animated piece of the displayed entry
#[derive(Clone, Debug, PartialEq)]
pub struct TextUnit {
    pub text: String,
    /// Delay before this unit starts entering
    pub delay_ms: f32,
    /// Visual state at the current moment of its transition
    pub state: VisualState,
}

struct RotatingState {
    texts: Vec<String>,
    config: RotatingTextConfig,
    motion: Motion,
    index: usize,
    /// Entry leaving the display, if its exit is still running
    exiting: Option<usize>,
    /// Time since the current entry was shown
    shown_ms: f32,
    changes: u64,
}

impl RotatingState {
    fn last(&self) -> usize {
        self.texts.len().saturating_sub(1)
    }

    fn show(&mut self, index: usize) {
        if index == self.index {
            return;
        }
        self.exiting = (!self.is_instant()).then_some(self.index);
        self.index = index;
        self.shown_ms = 0.0;
        self.changes += 1;
        tracing::debug!(index, text = %self.texts[index], "rotating text advanced");
    }

    /// Timer step; returns false once a single-pass rotation has finished
    fn advance(&mut self) -> bool {
        if self.texts.len() < 2 {
            return false;
        }
        if self.index == self.last() {
            if !self.config.looped {
                return false;
            }
            self.show(0);
        } else {
            self.show(self.index + 1);
        }
        self.config.looped || self.index < self.last()
    }

    fn stagger(&self) -> Stagger {
        if self.motion.is_reduced() {
            return Stagger::default();
        }
        Stagger::new(self.config.stagger_ms).starting_from(self.config.stagger_from)
    }

    fn is_instant(&self) -> bool {
        self.config.instant || self.motion.is_reduced() || self.config.transition_ms == 0
    }

    /// Units of entry `index` moving from `from` to `to`
    fn transition(&self, index: usize, from: VisualState, to: VisualState) -> Vec<TextUnit> {
        let Some(text) = self.texts.get(index) else {
            return Vec::new();
        };
        let pieces = self.config.split_by.split(text);
        let stagger = self.stagger();
        let duration = self.config.transition_ms as f32;

        pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| {
                let delay_ms = stagger.delay_for_index(i, pieces.len());
                let state = if self.is_instant() {
                    to
                } else {
                    let t = ((self.shown_ms - delay_ms) / duration).clamp(0.0, 1.0);
                    from.lerp(&to, self.config.easing.apply(t))
                };
                TextUnit {
                    text: (*piece).to_string(),
                    delay_ms,
                    state,
                }
            })
            .collect()
    }

    fn units(&self) -> Vec<TextUnit> {
        self.transition(
            self.index,
            VisualState::hidden_below(UNIT_TRAVEL),
            VisualState::VISIBLE,
        )
    }

    fn exiting_units(&self) -> Vec<TextUnit> {
        let Some(index) = self.exiting else {
            return Vec::new();
        };
        self.transition(
            index,
            VisualState::VISIBLE,
            VisualState::hidden_below(-UNIT_TRAVEL),
        )
    }

    /// Drop the outgoing entry once its last unit has left
    fn settle_exit(&mut self) {
        let Some(index) = self.exiting else {
            return;
        };
        let count = self
            .texts
            .get(index)
            .map_or(0, |t| self.config.split_by.split(t).len());
        let stagger = self.stagger();
        let longest = (0..count)
            .map(|i| stagger.delay_for_index(i, count))
            .fold(0.0, f32::max);
        if self.is_instant() || self.shown_ms >= longest + self.config.transition_ms as f32 {
            self.exiting = None;
        }
    }
}

/// Vertical distance a unit travels while entering or leaving
const UNIT_TRAVEL: f32 = 20.0;

/// Text that rotates through a list of entries
pub struct RotatingText {
    state: Arc<Mutex<RotatingState>>,
    scheduler: Option<SchedulerHandle>,
    timer: Option<TimerGuard>,
}

impl RotatingText {
    pub fn new<I, S>(texts: I, config: RotatingTextConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            tracing::debug!("rotating text has no entries; rendering nothing");
        }
        Self {
            state: Arc::new(Mutex::new(RotatingState {
                texts,
                config,
                motion: Motion::Full,
                index: 0,
                exiting: None,
                shown_ms: 0.0,
                changes: 0,
            })),
            scheduler: None,
            timer: None,
        }
    }

    pub fn with_motion(self, motion: Motion) -> Self {
        lock(&self.state).motion = motion;
        self
    }

    /// Start rotating on `scheduler`
    ///
    /// Nothing is scheduled for an empty or single-entry list or when
    /// `auto` is off.
    pub fn mount(&mut self, scheduler: &SchedulerHandle) {
        self.scheduler = Some(scheduler.clone());
        self.restart_timer();
    }

    /// Cancel the rotation; the current entry stays displayed
    pub fn unmount(&mut self) {
        self.timer = None;
        self.scheduler = None;
    }

    fn restart_timer(&mut self) {
        self.timer = None;
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        let (interval_ms, runs) = {
            let state = lock(&self.state);
            let finished = !state.config.looped && state.index == state.last();
            (
                state.config.interval_ms.max(1),
                state.config.auto && state.texts.len() > 1 && !finished,
            )
        };
        if !runs {
            return;
        }

        let state = Arc::downgrade(&self.state);
        self.timer = scheduler.schedule(interval_ms, move |_| {
            let Some(state) = state.upgrade() else {
                return Reschedule::Done;
            };
            if lock(&state).advance() {
                Reschedule::After(interval_ms)
            } else {
                Reschedule::Done
            }
        });
    }

    /// Show the next entry and restart the interval
    pub fn next(&mut self) {
        {
            let mut state = lock(&self.state);
            if state.texts.is_empty() {
                return;
            }
            let next = if state.index == state.last() {
                if state.config.looped {
                    0
                } else {
                    state.index
                }
            } else {
                state.index + 1
            };
            state.show(next);
        }
        self.restart_timer();
    }

    /// Show the previous entry and restart the interval
    pub fn previous(&mut self) {
        {
            let mut state = lock(&self.state);
            if state.texts.is_empty() {
                return;
            }
            let previous = match state.index {
                0 if state.config.looped => state.last(),
                0 => 0,
                i => i - 1,
            };
            state.show(previous);
        }
        self.restart_timer();
    }

    /// Show entry `index`; out-of-range indices are ignored
    pub fn jump_to(&mut self, index: usize) {
        {
            let mut state = lock(&self.state);
            if index >= state.texts.len() {
                tracing::warn!(index, len = state.texts.len(), "rotating text index out of range");
                return;
            }
            state.show(index);
        }
        self.restart_timer();
    }

    /// Back to the first entry
    pub fn reset(&mut self) {
        self.jump_to(0);
    }

    /// Advance unit transitions by `dt_ms`
    pub fn tick(&self, dt_ms: f32) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            let mut state = lock(&self.state);
            state.shown_ms += dt_ms;
            state.settle_exit();
        }
    }

    pub fn index(&self) -> usize {
        lock(&self.state).index
    }

    /// The displayed entry, or `None` for an empty list
    pub fn current(&self) -> Option<String> {
        let state = lock(&self.state);
        state.texts.get(state.index).cloned()
    }

    /// The displayed entry split into staggered units
    pub fn units(&self) -> Vec<TextUnit> {
        lock(&self.state).units()
    }

    /// The entry being swapped out, while its exit transition runs
    pub fn exiting(&self) -> Option<String> {
        let state = lock(&self.state);
        state.exiting.and_then(|i| state.texts.get(i).cloned())
    }

    /// The outgoing entry's units, empty once the swap has finished
    pub fn exiting_units(&self) -> Vec<TextUnit> {
        lock(&self.state).exiting_units()
    }

    /// Number of entry changes so far
    pub fn changes(&self) -> u64 {
        lock(&self.state).changes
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerGuard::is_active)
    }
}
