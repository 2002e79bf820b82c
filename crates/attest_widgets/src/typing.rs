//! Typing text
//!
//! Types each entry one character at a time, pauses once it is complete,
//! deletes it one character at a time and moves on to the next entry. For
//! an entry of length `L` one full cycle takes exactly
//! `L * typing_speed + pause + L * deleting_speed` before the next entry
//! starts typing.
//!
//! The caret blinks on its own timer, independent of typing. Both timers
//! are owned by the widget and cancelled when it is dropped.

use crate::motion::Motion;
use attest_core::sync::lock;
use attest_core::{Reschedule, SchedulerHandle, TimerGuard};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Typing text configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Milliseconds per typed character
    pub typing_speed_ms: u64,
    /// Milliseconds per deleted character
    pub deleting_speed_ms: u64,
    /// Pause once an entry is fully typed
    pub pause_ms: u64,
    /// Start over after the last entry; when false the last entry stays
    pub looped: bool,
    /// Caret blink half-period
    pub caret_blink_ms: u64,
    pub caret: String,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: 75,
            deleting_speed_ms: 50,
            pause_ms: 1500,
            looped: true,
            caret_blink_ms: 500,
            caret: "|".to_string(),
        }
    }
}

impl TypingConfig {
    pub fn speeds(mut self, typing_ms: u64, deleting_ms: u64) -> Self {
        self.typing_speed_ms = typing_ms;
        self.deleting_speed_ms = deleting_ms;
        self
    }

    pub fn pause(mut self, pause_ms: u64) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    pub fn single_pass(mut self) -> Self {
        self.looped = false;
        self
    }

    /// Length of one type, pause and delete cycle for a `len`-character entry
    pub fn cycle_ms(&self, len: usize) -> u64 {
        let len = len as u64;
        len * self.typing_speed_ms.max(1) + self.pause_ms + len * self.deleting_speed_ms.max(1)
    }
}

/// What the typing loop is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingPhase {
    Typing,
    Pausing,
    Deleting,
    /// Single pass finished; the last entry stays typed
    Done,
}

struct TypingState {
    texts: Vec<String>,
    config: TypingConfig,
    index: usize,
    /// Characters of the current entry shown
    offset: usize,
    phase: TypingPhase,
    caret_visible: bool,
    changes: u64,
}

impl TypingState {
    fn current_len(&self) -> usize {
        self.texts.get(self.index).map_or(0, |t| t.chars().count())
    }

    fn is_last(&self) -> bool {
        self.index + 1 >= self.texts.len()
    }

    /// Enter the current entry; returns the delay to the first keystroke
    fn begin_entry(&mut self) -> Option<u64> {
        if self.current_len() > 0 {
            self.phase = TypingPhase::Typing;
            return Some(self.config.typing_speed_ms.max(1));
        }
        self.finish_typing()
    }

    fn finish_typing(&mut self) -> Option<u64> {
        if self.is_last() && !self.config.looped {
            self.phase = TypingPhase::Done;
            tracing::debug!(index = self.index, "typing text finished");
            return None;
        }
        // No pause: the first deletion follows the last keystroke directly
        if self.config.pause_ms == 0 && self.offset > 0 {
            self.phase = TypingPhase::Deleting;
            return Some(self.config.deleting_speed_ms.max(1));
        }
        self.phase = TypingPhase::Pausing;
        Some(self.config.pause_ms)
    }

    fn next_entry(&mut self) -> Option<u64> {
        self.index = (self.index + 1) % self.texts.len();
        self.offset = 0;
        self.changes += 1;
        tracing::trace!(index = self.index, "typing next entry");
        self.begin_entry()
    }

    /// One timer step; returns the delay to the next one
    fn step(&mut self) -> Option<u64> {
        match self.phase {
            TypingPhase::Typing => {
                self.offset += 1;
                self.changes += 1;
                if self.offset < self.current_len() {
                    Some(self.config.typing_speed_ms.max(1))
                } else {
                    self.finish_typing()
                }
            }
            TypingPhase::Pausing => {
                if self.offset == 0 {
                    return self.next_entry();
                }
                self.phase = TypingPhase::Deleting;
                Some(self.config.deleting_speed_ms.max(1))
            }
            TypingPhase::Deleting => {
                self.offset = self.offset.saturating_sub(1);
                self.changes += 1;
                if self.offset == 0 {
                    self.next_entry()
                } else {
                    Some(self.config.deleting_speed_ms.max(1))
                }
            }
            TypingPhase::Done => None,
        }
    }

    fn visible_text(&self) -> &str {
        let Some(text) = self.texts.get(self.index) else {
            return "";
        };
        let end = text
            .char_indices()
            .nth(self.offset)
            .map_or(text.len(), |(i, _)| i);
        &text[..end]
    }
}

/// Text typed and deleted character by character with a blinking caret
pub struct TypingText {
    state: Arc<Mutex<TypingState>>,
    motion: Motion,
    typing_timer: Option<TimerGuard>,
    caret_timer: Option<TimerGuard>,
}

impl TypingText {
    pub fn new<I, S>(texts: I, config: TypingConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Arc::new(Mutex::new(TypingState {
                texts: texts.into_iter().map(Into::into).collect(),
                config,
                index: 0,
                offset: 0,
                phase: TypingPhase::Typing,
                caret_visible: true,
                changes: 0,
            })),
            motion: Motion::Full,
            typing_timer: None,
            caret_timer: None,
        }
    }

    /// Under reduced motion the caret stays solid
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Start typing the first entry and blinking the caret
    pub fn mount(&mut self, scheduler: &SchedulerHandle) {
        self.unmount();

        let (first_delay, blink_ms) = {
            let mut state = lock(&self.state);
            if state.texts.is_empty() {
                tracing::debug!("typing text has no entries; rendering nothing");
                return;
            }
            state.index = 0;
            state.offset = 0;
            state.caret_visible = true;
            (state.begin_entry(), state.config.caret_blink_ms)
        };

        if let Some(delay) = first_delay {
            let state = Arc::downgrade(&self.state);
            self.typing_timer = scheduler.schedule(delay, move |_| {
                let Some(state) = state.upgrade() else {
                    return Reschedule::Done;
                };
                let next = lock(&state).step();
                next.map_or(Reschedule::Done, Reschedule::After)
            });
        }

        if !self.motion.is_reduced() && blink_ms > 0 {
            let state = Arc::downgrade(&self.state);
            self.caret_timer = scheduler.interval(blink_ms, move |_| {
                if let Some(state) = state.upgrade() {
                    let mut state = lock(&state);
                    state.caret_visible = !state.caret_visible;
                }
            });
        }
    }

    /// Cancel both timers; the text stays as it is
    pub fn unmount(&mut self) {
        self.typing_timer = None;
        self.caret_timer = None;
    }

    /// The typed part of the current entry, without the caret
    pub fn text(&self) -> String {
        lock(&self.state).visible_text().to_string()
    }

    /// The typed text followed by the caret when it is in its visible phase
    pub fn display(&self) -> String {
        let state = lock(&self.state);
        let mut out = state.visible_text().to_string();
        if state.caret_visible && !state.texts.is_empty() {
            out.push_str(&state.config.caret);
        }
        out
    }

    pub fn index(&self) -> usize {
        lock(&self.state).index
    }

    pub fn phase(&self) -> TypingPhase {
        lock(&self.state).phase
    }

    pub fn caret_visible(&self) -> bool {
        lock(&self.state).caret_visible
    }

    /// Number of visible text changes so far
    pub fn changes(&self) -> u64 {
        lock(&self.state).changes
    }

    pub fn is_running(&self) -> bool {
        self.typing_timer.as_ref().is_some_and(TimerGuard::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::Scheduler;

    #[test]
    fn test_types_pauses_and_deletes() {
        let scheduler = Scheduler::new();
        let config = TypingConfig::default().speeds(100, 50).pause(1000);
        let mut typing = TypingText::new(["abc", "de"], config);
        typing.mount(&scheduler.handle());

        assert_eq!(typing.text(), "");
        scheduler.advance(100);
        assert_eq!(typing.text(), "a");
        scheduler.advance(200);
        assert_eq!(typing.text(), "abc");
        assert_eq!(typing.phase(), TypingPhase::Pausing);

        scheduler.advance(1000);
        assert_eq!(typing.phase(), TypingPhase::Deleting);
        assert_eq!(typing.text(), "abc");
        scheduler.advance(50);
        assert_eq!(typing.text(), "ab");
        scheduler.advance(99);
        assert_eq!(typing.text(), "a");

        // 3 * 100 + 1000 + 3 * 50
        scheduler.advance(1);
        assert_eq!(scheduler.now_ms(), 1450);
        assert_eq!(typing.index(), 1);
        assert_eq!(typing.text(), "");
        scheduler.advance(100);
        assert_eq!(typing.text(), "d");
    }

    #[test]
    fn test_zero_pause_cycle_matches_cycle_length() {
        let scheduler = Scheduler::new();
        let config = TypingConfig::default().speeds(10, 10).pause(0);
        let mut typing = TypingText::new(["abc", "de"], config.clone());
        typing.mount(&scheduler.handle());

        scheduler.advance(30);
        assert_eq!(typing.text(), "abc");
        assert_eq!(typing.phase(), TypingPhase::Deleting);
        scheduler.advance(10);
        assert_eq!(typing.text(), "ab");

        scheduler.advance(config.cycle_ms(3) - 40);
        assert_eq!(scheduler.now_ms(), 60);
        assert_eq!(typing.index(), 1);
        assert_eq!(typing.text(), "");
        assert_eq!(typing.phase(), TypingPhase::Typing);

        scheduler.advance(config.cycle_ms(2));
        assert_eq!(typing.index(), 0);
        assert_eq!(typing.text(), "");
    }

    #[test]
    fn test_cycle_length() {
        let config = TypingConfig::default().speeds(80, 40).pause(1200);
        assert_eq!(config.cycle_ms(6), 6 * 80 + 1200 + 6 * 40);
    }

    #[test]
    fn test_multibyte_entries() {
        let scheduler = Scheduler::new();
        let mut typing = TypingText::new(["né"], TypingConfig::default().speeds(10, 10));
        typing.mount(&scheduler.handle());
        scheduler.advance(20);
        assert_eq!(typing.text(), "né");
    }

    #[test]
    fn test_single_pass_keeps_last_entry() {
        let scheduler = Scheduler::new();
        let config = TypingConfig::default().speeds(10, 10).pause(100).single_pass();
        let mut typing = TypingText::new(["ab", "cd"], config);
        typing.mount(&scheduler.handle());

        scheduler.advance(10_000);
        assert_eq!(typing.text(), "cd");
        assert_eq!(typing.phase(), TypingPhase::Done);
        assert!(!typing.is_running());
    }

    #[test]
    fn test_caret_blinks_independently() {
        let scheduler = Scheduler::new();
        let mut typing = TypingText::new(["abc"], TypingConfig::default());
        typing.mount(&scheduler.handle());

        assert!(typing.caret_visible());
        scheduler.advance(500);
        assert!(!typing.caret_visible());
        assert!(!typing.display().ends_with('|'));
        scheduler.advance(500);
        assert!(typing.display().ends_with('|'));
    }

    #[test]
    fn test_reduced_motion_caret_is_solid() {
        let scheduler = Scheduler::new();
        let mut typing =
            TypingText::new(["abc"], TypingConfig::default()).with_motion(Motion::Reduced);
        typing.mount(&scheduler.handle());
        scheduler.advance(5_000);
        assert!(typing.caret_visible());
    }

    #[test]
    fn test_empty_list_schedules_nothing() {
        let scheduler = Scheduler::new();
        let mut typing = TypingText::new(Vec::<String>::new(), TypingConfig::default());
        typing.mount(&scheduler.handle());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(typing.display(), "");
    }
}
