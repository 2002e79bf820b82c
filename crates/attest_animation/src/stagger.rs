//! Stagger timing for groups of animated units

use serde::{Deserialize, Serialize};

/// Which unit starts first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    /// First unit first
    #[default]
    First,
    /// Last unit first
    Last,
    /// Middle unit(s) first, spreading outward
    Center,
    /// A specific unit first, spreading outward
    Index(usize),
}

/// Per-unit delay configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Delay between consecutive units in milliseconds
    pub delay_ms: f32,
    #[serde(default)]
    pub from: StaggerFrom,
}

impl Stagger {
    pub const fn new(delay_ms: f32) -> Self {
        Self {
            delay_ms,
            from: StaggerFrom::First,
        }
    }

    pub fn starting_from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    /// Delay for unit `index` of `total`, in milliseconds
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        if total == 0 || self.delay_ms <= 0.0 || !self.delay_ms.is_finite() {
            return 0.0;
        }
        let last = (total - 1) as f32;
        let i = index.min(total - 1) as f32;
        let distance = match self.from {
            StaggerFrom::First => i,
            StaggerFrom::Last => last - i,
            StaggerFrom::Center => (i - last / 2.0).abs(),
            StaggerFrom::Index(origin) => (i - origin.min(total - 1) as f32).abs(),
        };
        distance * self.delay_ms
    }

    /// Delay until the slowest unit starts
    pub fn total_delay(&self, total: usize) -> f32 {
        (0..total)
            .map(|i| self.delay_for_index(i, total))
            .fold(0.0, f32::max)
    }
}

impl Default for Stagger {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last() {
        let forward = Stagger::new(25.0);
        assert_eq!(forward.delay_for_index(0, 4), 0.0);
        assert_eq!(forward.delay_for_index(3, 4), 75.0);

        let reverse = Stagger::new(25.0).starting_from(StaggerFrom::Last);
        assert_eq!(reverse.delay_for_index(0, 4), 75.0);
        assert_eq!(reverse.delay_for_index(3, 4), 0.0);
    }

    #[test]
    fn test_center_spreads_outward() {
        let center = Stagger::new(10.0).starting_from(StaggerFrom::Center);
        let delays: Vec<f32> = (0..5).map(|i| center.delay_for_index(i, 5)).collect();
        assert_eq!(delays, vec![20.0, 10.0, 0.0, 10.0, 20.0]);

        // Even counts have two middle units sharing the smallest delay
        assert_eq!(center.delay_for_index(1, 4), center.delay_for_index(2, 4));
    }

    #[test]
    fn test_total_delay() {
        assert_eq!(Stagger::new(30.0).total_delay(5), 120.0);
        assert_eq!(Stagger::new(30.0).total_delay(0), 0.0);
    }
}
