//! Theme context resolution against live and simulated environments

use attest_core::sync::lock;
use attest_core::Scheduler;
use attest_theme::tokens::{DARK, LIGHT};
use attest_theme::{
    ColorScheme, ColorSchemeSource, EnvColorScheme, Palette, SchemeWatcher, ThemeContext,
    ThemeError, ThemePreference,
};
use std::sync::{Arc, Mutex};

/// An environment whose scheme the test can flip
fn switchable(
    initial: Option<ColorScheme>,
) -> (Arc<Mutex<Option<ColorScheme>>>, Arc<dyn ColorSchemeSource>) {
    let scheme = Arc::new(Mutex::new(initial));
    let reported = scheme.clone();
    (scheme, Arc::new(move || *lock(&reported)))
}

#[test]
fn system_preference_tracks_environment_on_every_read() {
    let (scheme, environment) = switchable(Some(ColorScheme::Light));
    let theme = ThemeContext::new(ThemePreference::System, environment);
    assert_eq!(theme.scheme(), ColorScheme::Light);
    assert_eq!(theme.palette(), &LIGHT);

    *lock(&scheme) = Some(ColorScheme::Dark);
    assert!(theme.is_dark());
    assert_eq!(theme.palette(), &DARK);
    assert_eq!(theme.pick("sun", "moon"), "moon");

    // Unknown environment falls back to light
    *lock(&scheme) = None;
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[test]
fn explicit_preference_ignores_environment() {
    let (_, environment) = switchable(Some(ColorScheme::Dark));
    let theme = ThemeContext::new(ThemePreference::Light, environment);
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[test]
fn watcher_reports_flips_to_restyle_particles() {
    let scheduler = Scheduler::new();
    let (scheme, environment) = switchable(Some(ColorScheme::Light));
    let theme = ThemeContext::new(ThemePreference::System, environment.clone());

    let restyled: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = restyled.clone();
    let watcher = SchemeWatcher::start(environment, &scheduler.handle(), 250, move |scheme| {
        let palette = Palette::for_scheme(scheme);
        lock(&sink).push(palette.particle(0).to_string());
    });

    scheduler.advance(1000);
    assert!(lock(&restyled).is_empty());

    *lock(&scheme) = Some(ColorScheme::Dark);
    scheduler.advance(250);
    assert_eq!(*lock(&restyled), [theme.palette().particle(0).to_string()]);
    assert_eq!(watcher.last_seen(), Some(ColorScheme::Dark));

    drop(watcher);
    *lock(&scheme) = Some(ColorScheme::Light);
    scheduler.advance(1000);
    assert_eq!(lock(&restyled).len(), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn env_source_prefers_explicit_variable() {
    let env = EnvColorScheme::with_lookup(|key| match key {
        "ATTEST_COLOR_SCHEME" => Some("Dark".to_string()),
        "GTK_THEME" => Some("Adwaita".to_string()),
        _ => None,
    });
    assert_eq!(env.query(), Some(ColorScheme::Dark));
}

#[test]
fn context_installs_once() {
    let installed = ThemeContext::without_environment(ThemePreference::Dark)
        .install()
        .unwrap();
    assert_eq!(installed.scheme(), ColorScheme::Dark);
    assert_eq!(ThemeContext::current().preference(), ThemePreference::Dark);
    assert!(matches!(
        ThemeContext::without_environment(ThemePreference::Light).install(),
        Err(ThemeError::AlreadyInstalled)
    ));
}
