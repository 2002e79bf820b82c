//! Report output model for headless scenario runs.

use anyhow::{bail, Context, Result};
use attest_pages::{PageSnapshot, Route};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub status: ReportStatus,
    pub page: Route,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Environment scheme changes seen while running
    pub scheme_changes: u32,
    /// Page state when the run ended
    pub snapshot: PageSnapshot,
}

/// Where a failed run stopped
#[derive(Debug, Clone)]
pub struct Failure {
    pub step_index: usize,
    pub assertion: String,
    pub code: String,
    pub message: String,
}

impl Report {
    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    /// Pretty JSON form of the report
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scenario report")
    }

    /// Save the report under the working directory
    ///
    /// Missing parent directories are created. Paths that could land
    /// outside the working directory are refused.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        check_report_path(path)?;
        let json = self.to_json()?;
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?,
            _ => {}
        }
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Print the report followed by a newline
    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.to_json()?)?;
        Ok(())
    }
}

/// Reports may only be written to relative paths inside the working directory
fn check_report_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("report path is empty");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                bail!("report path `{}` leaves the working directory", path.display())
            }
            Component::RootDir | Component::Prefix(_) => {
                bail!("report path `{}` must be relative", path.display())
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_checks() {
        assert!(check_report_path(Path::new("report.json")).is_ok());
        assert!(check_report_path(Path::new("./out/run-1.json")).is_ok());
        assert!(check_report_path(Path::new("")).is_err());
        assert!(check_report_path(Path::new("out/../../report.json")).is_err());
        assert!(check_report_path(Path::new("/var/report.json")).is_err());
    }
}
