//! Range mapping
//!
//! Maps a driver value (usually scroll progress) through piecewise input
//! stops onto output stops. Each derived transform of a scroll-linked
//! element (opacity, scale, y offset) is one `RangeMap` with its own
//! domains.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Piecewise mapping from input stops to output stops
///
/// Deserialized maps go through [`RangeMap::new`], so loaded stop lists are
/// truncated to matching lengths like constructed ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RangeMapDef")]
pub struct RangeMap {
    input: SmallVec<[f32; 4]>,
    output: SmallVec<[f32; 4]>,
    /// Easing applied within each segment
    pub easing: Easing,
    /// Clamp outside the input domain instead of extrapolating
    pub clamp: bool,
}

/// Wire shape of a [`RangeMap`]
#[derive(Deserialize)]
struct RangeMapDef {
    #[serde(default)]
    input: Vec<f32>,
    #[serde(default)]
    output: Vec<f32>,
    #[serde(default)]
    easing: Easing,
    #[serde(default = "default_clamp")]
    clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl From<RangeMapDef> for RangeMap {
    fn from(def: RangeMapDef) -> Self {
        Self {
            easing: def.easing,
            clamp: def.clamp,
            ..RangeMap::new(&def.input, &def.output)
        }
    }
}

impl RangeMap {
    /// Build a mapping; extra stops on the longer side are dropped
    ///
    /// Input stops must be ascending. A mapping with no stops passes the
    /// value through unchanged and a single stop maps everything to its
    /// output, so malformed configuration degrades instead of failing.
    pub fn new(input: &[f32], output: &[f32]) -> Self {
        let n = input.len().min(output.len());
        if n != input.len() || n != output.len() {
            tracing::warn!(
                input = input.len(),
                output = output.len(),
                "range map stop counts differ, truncating"
            );
        }
        Self {
            input: input[..n].iter().copied().collect(),
            output: output[..n].iter().copied().collect(),
            easing: Easing::Linear,
            clamp: true,
        }
    }

    /// Two-stop mapping `[from.0, from.1] -> [to.0, to.1]`
    pub fn linear(from: (f32, f32), to: (f32, f32)) -> Self {
        Self::new(&[from.0, from.1], &[to.0, to.1])
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn unclamped(mut self) -> Self {
        self.clamp = false;
        self
    }

    pub fn apply(&self, value: f32) -> f32 {
        let n = self.input.len();
        match n {
            0 => return value,
            1 => return self.output[0],
            _ => {}
        }
        if value.is_nan() {
            return self.output[0];
        }

        // Segment containing the value (first/last for out-of-domain values)
        let seg = self.input[1..n - 1]
            .iter()
            .position(|&stop| value < stop)
            .unwrap_or(n - 2);

        let (in0, in1) = (self.input[seg], self.input[seg + 1]);
        let (out0, out1) = (self.output[seg], self.output[seg + 1]);

        let span = in1 - in0;
        if span.abs() < f32::EPSILON {
            return if value < in0 { out0 } else { out1 };
        }

        let mut t = (value - in0) / span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        let eased = if (0.0..=1.0).contains(&t) {
            self.easing.apply(t)
        } else {
            t
        };
        out0 + (out1 - out0) * eased
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_mapping_and_clamp() {
        let fade = RangeMap::linear((0.0, 0.5), (1.0, 0.0));
        assert_eq!(fade.apply(0.0), 1.0);
        assert_eq!(fade.apply(0.25), 0.5);
        assert_eq!(fade.apply(0.5), 0.0);
        assert_eq!(fade.apply(1.0), 0.0);
        assert_eq!(fade.apply(-1.0), 1.0);
    }

    #[test]
    fn test_unclamped_extrapolates() {
        let y = RangeMap::linear((0.0, 1.0), (0.0, 100.0)).unclamped();
        assert_eq!(y.apply(1.5), 150.0);
    }

    #[test]
    fn test_piecewise_stops() {
        let opacity = RangeMap::new(&[0.0, 0.2, 0.8, 1.0], &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(opacity.apply(0.1), 0.5);
        assert_eq!(opacity.apply(0.5), 1.0);
        assert!((opacity.apply(0.9) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_maps_do_not_panic() {
        assert_eq!(RangeMap::new(&[], &[]).apply(0.7), 0.7);
        assert_eq!(RangeMap::new(&[0.0], &[3.0]).apply(0.7), 3.0);
        assert_eq!(RangeMap::new(&[0.0, 1.0, 2.0], &[5.0]).apply(9.0), 5.0);
        assert_eq!(RangeMap::linear((0.5, 0.5), (0.0, 1.0)).apply(0.7), 1.0);
    }

    #[test]
    fn test_loaded_map_with_mismatched_stops_is_truncated() {
        let map: RangeMap =
            serde_json::from_str(r#"{"input":[0.0,0.5,1.0],"output":[1.0]}"#).unwrap();
        assert_eq!(map.apply(0.7), 1.0);

        let map: RangeMap = serde_json::from_str(
            r#"{"input":[0.0,1.0,2.0],"output":[0.0,10.0],"easing":"linear","clamp":false}"#,
        )
        .unwrap();
        assert_eq!(map.apply(0.5), 5.0);
        assert_eq!(map.apply(1.5), 15.0);
        assert_eq!(map, RangeMap::linear((0.0, 1.0), (0.0, 10.0)).unclamped());
    }
}
