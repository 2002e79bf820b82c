//! Motion preference
//!
//! Hosts that honour a reduced-motion setting pass [`Motion::Reduced`] to
//! the animating widgets. State transitions and timers are unchanged; only
//! the visual interpolation is skipped.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    #[default]
    Full,
    Reduced,
}

impl Motion {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            Motion::Reduced
        } else {
            Motion::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == Motion::Reduced
    }
}
