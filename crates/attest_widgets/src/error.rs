//! Widget configuration errors
//!
//! Widgets themselves never fail at runtime; only parsing user-facing
//! configuration can.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("invalid scroll offset `{0}`: expected start, center, end or a number")]
    InvalidOffset(String),

    #[error("invalid scroll offset pair `{0}`: expected \"<target> <viewport>\"")]
    InvalidOffsetPair(String),

    #[error("unknown split mode `{0}`: expected characters, words or lines")]
    InvalidSplit(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
