//! Attest headless tooling
//!
//! Configuration, logging and the scenario runner behind the `attest`
//! binary. A scenario mounts one page, drives it with scroll, pointer,
//! click and form steps on a virtual clock, checks assertions along the
//! way and ends in a JSON [`Report`].

pub mod assert;
pub mod config;
pub mod logging;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::AttestConfig;
pub use report::{Report, ReportStatus};
pub use runner::Runner;
pub use scenario::{Scenario, ScenarioStep};
