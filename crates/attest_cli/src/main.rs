//! Attest CLI
//!
//! - `attest pages` lists the site's pages and the primitives they compose
//! - `attest resolve-theme` prints the effective color scheme
//! - `attest run <scenario>` plays a scenario against a page headlessly

use anyhow::{Context, Result};
use attest_cli::{logging, AttestConfig, Runner, Scenario};
use attest_core::{EventDispatcher, SchedulerHandle, Viewport};
use attest_pages::{Page, PageContext, Route};
use attest_theme::{ColorSchemeSource, EnvColorScheme, ThemeContext, ThemePreference};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "attest", version, about = "Headless tooling for the Attest site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file or directory containing attest.toml
    #[arg(short, long, global = true, default_value = "attest.toml")]
    config: PathBuf,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Theme preference (overrides the config file)
    #[arg(long, global = true)]
    theme: Option<ThemePreference>,

    /// Disable non-essential motion
    #[arg(long, global = true)]
    reduced_motion: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List pages and the primitives each one composes
    Pages,

    /// Print the effective color scheme
    ResolveTheme,

    /// Run a JSON scenario against a page
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Page to mount (overrides the scenario's page)
        #[arg(short, long)]
        page: Option<Route>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let mut config = AttestConfig::load(&cli.config)?;
    if let Some(preference) = cli.theme {
        config.theme.preference = preference;
    }
    config.motion.reduced |= cli.reduced_motion;

    let environment: Arc<dyn ColorSchemeSource> = Arc::new(EnvColorScheme::new());
    // Pages read the theme through `ThemeContext::current`
    config.install_theme(environment.clone())?;

    match cli.command {
        Commands::Pages => cmd_pages(&config, cli.json),
        Commands::ResolveTheme => cmd_resolve_theme(environment.as_ref(), cli.json),
        Commands::Run {
            scenario,
            page,
            report,
        } => cmd_run(config, environment, scenario, page, report),
    }
}

#[derive(Serialize)]
struct PageSummary {
    route: Route,
    path: &'static str,
    title: &'static str,
    elements: usize,
    primitives: Vec<&'static str>,
}

fn cmd_pages(config: &AttestConfig, json: bool) -> Result<ExitCode> {
    let viewport = Viewport::new(config.runtime.width as f32, config.runtime.height as f32);
    let summaries: Vec<PageSummary> = Route::ALL
        .into_iter()
        .map(|route| {
            // Detached: nothing animates, only the composition is listed
            let ctx = PageContext::new(EventDispatcher::new(), SchedulerHandle::detached())
                .with_viewport(viewport);
            let page = Page::mount(route, ctx);
            PageSummary {
                route,
                path: route.path(),
                title: route.title(),
                elements: page.nodes().len(),
                primitives: page.primitives(),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for page in &summaries {
            println!(
                "{:<12} {:<10} {:>3} elements  {}",
                page.path,
                page.title,
                page.elements,
                page.primitives.join(", ")
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_resolve_theme(environment: &dyn ColorSchemeSource, json: bool) -> Result<ExitCode> {
    let detected = environment.query();
    let theme = ThemeContext::current();
    let scheme = theme.scheme();

    if json {
        let value = serde_json::json!({
            "preference": theme.preference(),
            "environment": detected,
            "scheme": scheme,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{scheme}");
    }
    tracing::debug!(preference = %theme.preference(), ?detected, %scheme, "theme resolved");
    Ok(ExitCode::SUCCESS)
}

fn cmd_run(
    config: AttestConfig,
    environment: Arc<dyn ColorSchemeSource>,
    path: PathBuf,
    page: Option<Route>,
    report_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let mut scenario = Scenario::from_path(&path)?;
    if let Some(page) = page {
        scenario.page = page;
    }

    let runner = Runner::new(config).with_environment(environment);
    let report = runner.run(&scenario)?;

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(report_path) = report_path {
        report
            .write_to_path(&report_path)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
    }

    Ok(if report.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
