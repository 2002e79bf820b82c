//! Scroll-linked progress
//!
//! A [`ScrollTracker`] follows one container through the viewport and
//! exposes a progress value in `0.0..=1.0`. Derived values (a hero that
//! fades, shrinks and drifts as it scrolls away) are [`MotionTransform`]s
//! sampled from that progress, each with its own input and output domain.
//!
//! Progress is measured between two alignment points, each pairing an edge
//! of the container with an edge of the viewport. With the default
//! `["start start", "end end"]` progress is 0 when the container's top
//! meets the viewport's top and 1 when its bottom meets the viewport's
//! bottom, so a container taller than the viewport traverses the whole
//! range while it scrolls through.

use crate::error::{Result, WidgetError};
use attest_animation::{Easing, RangeMap, VisualState};
use attest_core::events::{event_types, WINDOW};
use attest_core::sync::lock;
use attest_core::{EventDispatcher, Rect, Subscription, Viewport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Scroll distances shorter than this count as a single point
const DEGENERATE_RANGE: f32 = 0.5;

/// A position along an element's (or the viewport's) block axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollOffset {
    Start,
    Center,
    End,
    /// Fraction of the length from the start edge
    Fraction(f32),
}

impl ScrollOffset {
    pub fn fraction(self) -> f32 {
        match self {
            ScrollOffset::Start => 0.0,
            ScrollOffset::Center => 0.5,
            ScrollOffset::End => 1.0,
            ScrollOffset::Fraction(f) => f,
        }
    }
}

impl FromStr for ScrollOffset {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "start" => return Ok(ScrollOffset::Start),
            "center" => return Ok(ScrollOffset::Center),
            "end" => return Ok(ScrollOffset::End),
            _ => {}
        }
        let fraction = match s.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f32>().map(|p| p / 100.0),
            None => s.parse::<f32>(),
        };
        match fraction {
            Ok(f) if f.is_finite() => Ok(ScrollOffset::Fraction(f)),
            _ => Err(WidgetError::InvalidOffset(s.to_string())),
        }
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollOffset::Start => f.write_str("start"),
            ScrollOffset::Center => f.write_str("center"),
            ScrollOffset::End => f.write_str("end"),
            ScrollOffset::Fraction(v) => write!(f, "{v}"),
        }
    }
}

/// A container edge aligned with a viewport edge
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffsetPair {
    pub target: ScrollOffset,
    pub viewport: ScrollOffset,
}

impl OffsetPair {
    pub const fn new(target: ScrollOffset, viewport: ScrollOffset) -> Self {
        Self { target, viewport }
    }

    /// Scroll position at which the two edges line up
    fn scroll_position(&self, container: &Rect, viewport_height: f32) -> f32 {
        container.top() + self.target.fraction() * container.height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for OffsetPair {
    type Err = WidgetError;

    /// Parses `"<target> <viewport>"`, e.g. `"start end"` or `"0.25 center"`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(target), Some(viewport), None) => {
                Ok(Self::new(target.parse()?, viewport.parse()?))
            }
            _ => Err(WidgetError::InvalidOffsetPair(s.to_string())),
        }
    }
}

impl fmt::Display for OffsetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.viewport)
    }
}

/// Where progress starts (0.0) and ends (1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffsets {
    pub start: OffsetPair,
    pub end: OffsetPair,
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self {
            start: OffsetPair::new(ScrollOffset::Start, ScrollOffset::Start),
            end: OffsetPair::new(ScrollOffset::End, ScrollOffset::End),
        }
    }
}

impl ScrollOffsets {
    /// Parse both alignment points from their string forms
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Progress from the moment the container enters at the bottom until it
    /// leaves at the top
    pub fn through_viewport() -> Self {
        Self {
            start: OffsetPair::new(ScrollOffset::Start, ScrollOffset::End),
            end: OffsetPair::new(ScrollOffset::End, ScrollOffset::Start),
        }
    }

    /// Progress while the container scrolls out past the viewport's top
    pub fn exiting() -> Self {
        Self {
            start: OffsetPair::new(ScrollOffset::Start, ScrollOffset::Start),
            end: OffsetPair::new(ScrollOffset::End, ScrollOffset::Start),
        }
    }
}

/// Progress of `container` through `viewport`, clamped to `0.0..=1.0`
///
/// A range that collapses to a single scroll position is a step: 0 before
/// it and 1 from it on.
pub fn scroll_progress(container: &Rect, offsets: &ScrollOffsets, viewport: &Viewport) -> f32 {
    let start = offsets.start.scroll_position(container, viewport.height);
    let end = offsets.end.scroll_position(container, viewport.height);
    let scroll = viewport.scroll_y;
    let range = end - start;

    if !range.is_finite() || !scroll.is_finite() {
        return 0.0;
    }
    if range.abs() < DEGENERATE_RANGE {
        return if scroll < start { 0.0 } else { 1.0 };
    }
    ((scroll - start) / range).clamp(0.0, 1.0)
}

struct TrackerState {
    container: Rect,
    offsets: ScrollOffsets,
    progress: f32,
    updates: u64,
}

impl TrackerState {
    fn update(&mut self, viewport: &Viewport) -> f32 {
        let progress = scroll_progress(&self.container, &self.offsets, viewport);
        if progress != self.progress {
            tracing::trace!(progress, scroll_y = viewport.scroll_y, "scroll progress");
        }
        self.progress = progress;
        self.updates += 1;
        progress
    }
}

/// Follows one container through the viewport
///
/// The tracker listens to window scroll and resize events once attached;
/// dropping it (or calling [`detach`](Self::detach)) removes the listener.
pub struct ScrollTracker {
    state: Arc<Mutex<TrackerState>>,
    subscription: Option<Subscription>,
}

impl ScrollTracker {
    pub fn new(container: Rect) -> Self {
        Self::with_offsets(container, ScrollOffsets::default())
    }

    pub fn with_offsets(container: Rect, offsets: ScrollOffsets) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState {
                container,
                offsets,
                progress: 0.0,
                updates: 0,
            })),
            subscription: None,
        }
    }

    /// Start following viewport events
    ///
    /// Progress is computed from `viewport` straight away, so a tracker
    /// mounted mid-page is correct before the first scroll. Attaching an
    /// already attached tracker does nothing.
    pub fn attach(&mut self, dispatcher: &EventDispatcher, viewport: Viewport) {
        if self.subscription.is_some() {
            tracing::debug!("scroll tracker already attached");
            return;
        }
        lock(&self.state).update(&viewport);

        let state = Arc::downgrade(&self.state);
        self.subscription = Some(dispatcher.register_many(
            WINDOW,
            &[event_types::SCROLL, event_types::RESIZE],
            move |event| {
                let (Some(viewport), Some(state)) = (event.viewport(), state.upgrade()) else {
                    return;
                };
                lock(&state).update(&viewport);
            },
        ));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Recompute against `viewport` without an event
    pub fn update(&self, viewport: &Viewport) -> f32 {
        lock(&self.state).update(viewport)
    }

    /// Move the container after a layout change
    pub fn set_container(&self, container: Rect) {
        lock(&self.state).container = container;
    }

    pub fn progress(&self) -> f32 {
        lock(&self.state).progress
    }

    /// Number of progress recomputations so far
    pub fn updates(&self) -> u64 {
        lock(&self.state).updates
    }

    /// Sample a derived value at the current progress
    pub fn sample(&self, transform: &MotionTransform) -> f32 {
        transform.apply(self.progress())
    }
}

/// A derived value driven by scroll progress
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionTransform {
    map: RangeMap,
}

impl MotionTransform {
    /// Map progress in `[input.0, input.1]` onto `[output.0, output.1]`
    pub fn new(input: (f32, f32), output: (f32, f32)) -> Self {
        Self {
            map: RangeMap::linear(input, output),
        }
    }

    /// Multi-stop mapping
    pub fn stops(input: &[f32], output: &[f32]) -> Self {
        Self {
            map: RangeMap::new(input, output),
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.map = self.map.with_easing(easing);
        self
    }

    /// Extrapolate outside the input domain
    pub fn unclamped(mut self) -> Self {
        self.map = self.map.unclamped();
        self
    }

    pub fn apply(&self, progress: f32) -> f32 {
        self.map.apply(progress)
    }
}

/// Opacity, scale and vertical offset derived from one progress value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollTransforms {
    pub opacity: MotionTransform,
    pub scale: MotionTransform,
    pub translate_y: MotionTransform,
}

impl ScrollTransforms {
    /// Hero treatment: fades out over the first half, shrinks slightly and
    /// drifts down at a slower rate than the page
    pub fn hero_parallax() -> Self {
        Self {
            opacity: MotionTransform::new((0.0, 0.5), (1.0, 0.0)),
            scale: MotionTransform::new((0.0, 1.0), (1.0, 0.9)),
            translate_y: MotionTransform::new((0.0, 1.0), (0.0, 150.0)),
        }
    }

    pub fn sample(&self, progress: f32) -> VisualState {
        VisualState::VISIBLE
            .with_opacity(self.opacity.apply(progress))
            .with_scale(self.scale.apply(progress))
            .with_translate(0.0, self.translate_y.apply(progress))
    }
}

impl Default for ScrollTransforms {
    fn default() -> Self {
        Self::hero_parallax()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::Event;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_tall_container_traverses_full_range() {
        let container = Rect::new(0.0, 1000.0, 1280.0, 2000.0);
        let offsets = ScrollOffsets::default();
        let vp = Viewport::new(1280.0, 720.0);

        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(0.0)), 0.0);
        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(1000.0)), 0.0);
        assert!(approx(scroll_progress(&container, &offsets, &vp.with_scroll(1640.0)), 0.5));
        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(2280.0)), 1.0);
        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(5000.0)), 1.0);
    }

    #[test]
    fn test_progress_is_monotonic_while_scrolling_down() {
        let container = Rect::new(0.0, 400.0, 1280.0, 900.0);
        let offsets = ScrollOffsets::through_viewport();
        let vp = Viewport::new(1280.0, 720.0);

        let mut last = 0.0;
        for step in 0..40 {
            let p = scroll_progress(&container, &offsets, &vp.with_scroll(step as f32 * 50.0));
            assert!(p >= last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_degenerate_range_is_a_step() {
        // Container exactly as tall as the viewport: start and end coincide
        let container = Rect::new(0.0, 500.0, 1280.0, 720.0);
        let offsets = ScrollOffsets::default();
        let vp = Viewport::new(1280.0, 720.0);

        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(499.0)), 0.0);
        assert_eq!(scroll_progress(&container, &offsets, &vp.with_scroll(500.0)), 1.0);
    }

    #[test]
    fn test_offset_parsing() {
        assert_eq!("center".parse::<ScrollOffset>(), Ok(ScrollOffset::Center));
        assert_eq!("25%".parse::<ScrollOffset>(), Ok(ScrollOffset::Fraction(0.25)));
        assert_eq!("0.75".parse::<ScrollOffset>(), Ok(ScrollOffset::Fraction(0.75)));
        assert!(matches!(
            "middle".parse::<ScrollOffset>(),
            Err(WidgetError::InvalidOffset(_))
        ));

        let offsets = ScrollOffsets::parse("start end", "end start").unwrap();
        assert_eq!(offsets, ScrollOffsets::through_viewport());
        assert!(matches!(
            "start".parse::<OffsetPair>(),
            Err(WidgetError::InvalidOffsetPair(_))
        ));
        assert_eq!(offsets.start.to_string(), "start end");
    }

    #[test]
    fn test_attach_updates_on_events_and_detaches_on_drop() {
        let dispatcher = EventDispatcher::new();
        let vp = Viewport::new(1280.0, 720.0);
        let mut tracker = ScrollTracker::new(Rect::new(0.0, 0.0, 1280.0, 1720.0));

        tracker.attach(&dispatcher, vp);
        tracker.attach(&dispatcher, vp);
        assert_eq!(dispatcher.handler_count(), 2);
        assert_eq!(tracker.updates(), 1);

        dispatcher.dispatch(&mut Event::scroll(vp.with_scroll(500.0)));
        assert!(approx(tracker.progress(), 0.5));

        dispatcher.dispatch(&mut Event::resize(Viewport::new(1280.0, 1720.0)));
        assert_eq!(tracker.updates(), 3);

        drop(tracker);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_hero_parallax_sample() {
        let transforms = ScrollTransforms::hero_parallax();
        let start = transforms.sample(0.0);
        assert_eq!(start, VisualState::VISIBLE);

        let half = transforms.sample(0.5);
        assert_eq!(half.opacity, 0.0);
        assert!(approx(half.scale, 0.95));
        assert!(approx(half.translate_y, 75.0));
    }

    #[test]
    fn test_loaded_transforms_tolerate_mismatched_stops() {
        let transform: MotionTransform =
            serde_json::from_str(r#"{"map":{"input":[0.0,0.5,1.0],"output":[1.0]}}"#).unwrap();
        assert_eq!(transform.apply(0.7), 1.0);

        let json = serde_json::to_string(&ScrollTransforms::hero_parallax()).unwrap();
        let loaded: ScrollTransforms = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, ScrollTransforms::hero_parallax());
    }
}
