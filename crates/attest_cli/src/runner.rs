//! Scenario runner driving a mounted page on a virtual clock

use crate::assert::{
    evaluate_active, evaluate_last_action, evaluate_scheme, evaluate_text_contains,
    AssertionResult,
};
use crate::config::AttestConfig;
use crate::report::{Failure, Report, ReportStatus};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{bail, Result};
use attest_core::sync::lock;
use attest_core::{EventDispatcher, Scheduler, Viewport};
use attest_pages::{Page, PageContext, PageError};
use attest_theme::{ColorScheme, ColorSchemeSource, SchemeWatcher, ThemeContext, Unavailable};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Frames and logical milliseconds elapsed so far
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    pub frames: u64,
    pub ms: u64,
}

/// State shared by the steps of one run
struct Run<'a> {
    page: Page,
    scheduler: &'a Scheduler,
    system: Arc<Mutex<Option<ColorScheme>>>,
    theme: ThemeContext,
    tick_ms: u64,
    clock: Clock,
}

impl Run<'_> {
    fn frame(&mut self, ms: u64) {
        self.scheduler.advance(ms);
        self.page.tick(ms as f32);
        self.clock.frames = self.clock.frames.saturating_add(1);
        self.clock.ms = self.clock.ms.saturating_add(ms);
    }

    fn step(&mut self, step: &ScenarioStep) -> Result<AssertionResult, PageError> {
        match step {
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                while remaining > 0 {
                    let step_ms = remaining.min(self.tick_ms);
                    remaining -= step_ms;
                    self.frame(step_ms);
                }
            }
            ScenarioStep::Tick { frames } => {
                for _ in 0..*frames {
                    self.frame(self.tick_ms);
                }
            }
            ScenarioStep::Click { id, item } => {
                if let Some(action) = self.page.click(id, *item)? {
                    tracing::info!(?action, element = %id, "page requested action");
                }
            }
            ScenarioStep::Hover { id, item } => self.page.hover(id, *item)?,
            ScenarioStep::Pointer { id, x, y } => self.page.pointer_move(id, *x, *y)?,
            ScenarioStep::PointerLeave { id } => self.page.pointer_leave(id)?,
            ScenarioStep::Scroll { y } => self.page.scroll_to(*y),
            ScenarioStep::ScrollTo { id } => self.page.scroll_into_view(id)?,
            ScenarioStep::Resize { width, height } => self.page.resize(*width, *height),
            ScenarioStep::Fill { id, field, value } => self.page.fill(id, *field, value)?,
            ScenarioStep::Submit { id } => self.page.submit(id)?,
            ScenarioStep::SystemScheme { scheme } => *lock(&self.system) = Some(*scheme),
            ScenarioStep::AssertTextContains { id, value } => {
                return Ok(evaluate_text_contains(&self.page, id.as_deref(), value))
            }
            ScenarioStep::AssertActive { id, index } => {
                return Ok(evaluate_active(&self.page, id, *index))
            }
            ScenarioStep::AssertLastAction { expected } => {
                return Ok(evaluate_last_action(&self.page, expected))
            }
            ScenarioStep::AssertScheme { scheme } => {
                return Ok(evaluate_scheme(self.theme.scheme(), *scheme))
            }
        }
        Ok(AssertionResult::Passed)
    }
}

/// Runs scenarios under one configuration
pub struct Runner {
    config: AttestConfig,
    environment: Arc<dyn ColorSchemeSource>,
}

impl Runner {
    /// A runner whose environment reports no color scheme
    pub fn new(config: AttestConfig) -> Self {
        Self {
            config,
            environment: Arc::new(Unavailable),
        }
    }

    /// Fall back to `environment` when a scenario does not set the scheme
    pub fn with_environment(mut self, environment: Arc<dyn ColorSchemeSource>) -> Self {
        self.environment = environment;
        self
    }

    pub fn config(&self) -> &AttestConfig {
        &self.config
    }

    /// Mount the scenario's page and play its steps
    ///
    /// Step failures (a failed assertion, an unknown element, a rejected
    /// form) end the run with a failed report. Only an unusable runtime
    /// configuration is an error.
    pub fn run(&self, scenario: &Scenario) -> Result<Report> {
        let runtime = &self.config.runtime;
        if runtime.width == 0 || runtime.height == 0 {
            bail!("viewport dimensions must be non-zero");
        }
        if runtime.tick_ms == 0 {
            bail!("tick_ms must be > 0");
        }
        if self.config.theme.poll_ms == 0 {
            bail!("theme poll_ms must be > 0");
        }

        let scheduler = Scheduler::new();

        let system = Arc::new(Mutex::new(scenario.system_scheme));
        let reported = system.clone();
        let fallback = self.environment.clone();
        let source: Arc<dyn ColorSchemeSource> =
            Arc::new(move || (*lock(&reported)).or_else(|| fallback.query()));
        let theme = ThemeContext::new(self.config.theme.preference, source.clone());

        let scheme_changes = Arc::new(AtomicU32::new(0));
        let counter = scheme_changes.clone();
        let _watcher = SchemeWatcher::start(
            source,
            &scheduler.handle(),
            self.config.theme.poll_ms,
            move |scheme| {
                counter.fetch_add(1, Ordering::Relaxed);
                tracing::info!(%scheme, "system color scheme changed");
            },
        );

        let ctx = PageContext::new(EventDispatcher::new(), scheduler.handle())
            .with_viewport(Viewport::new(runtime.width as f32, runtime.height as f32))
            .with_motion(self.config.motion.motion())
            .with_theme(theme.clone())
            .with_submit_delay(self.config.contact.submit_delay_ms);

        let mut run = Run {
            page: Page::mount(scenario.page, ctx),
            scheduler: &scheduler,
            system,
            theme,
            tick_ms: runtime.tick_ms,
            clock: Clock::default(),
        };

        let mut failure = None;
        for (step_index, step) in scenario.steps.iter().enumerate() {
            tracing::debug!(step = step.name(), step_index, "scenario step");
            let (code, message) = match run.step(step) {
                Ok(AssertionResult::Passed) => continue,
                Ok(AssertionResult::Failed { code, message }) => (code, message),
                Err(err) => ("page_error".to_string(), err.to_string()),
            };
            tracing::warn!(step = step.name(), step_index, %message, "scenario step failed");
            failure = Some(Failure {
                step_index,
                assertion: step.name().to_string(),
                code,
                message,
            });
            break;
        }

        let report = Report {
            status: if failure.is_some() {
                ReportStatus::Failed
            } else {
                ReportStatus::Passed
            },
            page: scenario.page,
            failed_step_index: failure.as_ref().map(|f| f.step_index),
            assertion: failure.as_ref().map(|f| f.assertion.clone()),
            code: failure.as_ref().map(|f| f.code.clone()),
            message: failure.map(|f| f.message),
            elapsed_frames: run.clock.frames,
            elapsed_ms: run.clock.ms,
            scheme_changes: scheme_changes.load(Ordering::Relaxed),
            snapshot: run.page.snapshot(),
        };
        tracing::info!(
            page = %scenario.page,
            status = ?report.status,
            elapsed_ms = report.elapsed_ms,
            "scenario finished"
        );
        Ok(report)
    }
}
