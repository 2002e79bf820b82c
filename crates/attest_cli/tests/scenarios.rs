//! Scenarios played end to end through the runner

use attest_cli::{AttestConfig, ReportStatus, Runner, Scenario};
use attest_theme::{ColorScheme, FixedScheme, ThemePreference};
use std::sync::Arc;

fn run_with(config: AttestConfig, json: &str) -> attest_cli::Report {
    let scenario = Scenario::from_json(json).expect("scenario parses");
    Runner::new(config).run(&scenario).expect("runtime config is valid")
}

fn run(json: &str) -> attest_cli::Report {
    run_with(AttestConfig::default(), json)
}

#[test]
fn home_page_tour() {
    let report = run(
        r#"{
            "page": "home",
            "steps": [
                { "type": "assert_text_contains", "id": "hero-verbs", "value": "Trust." },
                { "type": "wait", "ms": 2500 },
                { "type": "assert_text_contains", "id": "hero-verbs", "value": "Govern." },
                { "type": "assert_active", "id": "industries", "index": 0 },
                { "type": "hover", "id": "industries", "item": 3 },
                { "type": "assert_active", "id": "industries", "index": 3 },
                { "type": "scroll_to", "id": "testimonial" },
                { "type": "assert_text_contains", "value": "regulators an answer" },
                { "type": "click", "id": "get-started" },
                {
                    "type": "assert_last_action",
                    "expected": { "action": "navigate", "route": "contact" }
                }
            ]
        }"#,
    );
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);
    assert_eq!(report.snapshot.actions.len(), 1);
}

#[test]
fn contact_form_submission() {
    let mut config = AttestConfig::default();
    config.contact.submit_delay_ms = 500;
    let report = run_with(
        config,
        r#"{
            "page": "contact",
            "steps": [
                { "type": "fill", "id": "contact-form", "field": "name", "value": "Ada" },
                {
                    "type": "fill", "id": "contact-form",
                    "field": "email", "value": "ada@example.com"
                },
                { "type": "fill", "id": "contact-form", "field": "message", "value": "Hello" },
                { "type": "submit", "id": "contact-form" },
                { "type": "assert_text_contains", "id": "contact-form", "value": "Sending..." },
                { "type": "wait", "ms": 500 },
                { "type": "assert_text_contains", "id": "contact-form", "value": "Thank you!" },
                { "type": "click", "id": "faq", "item": 2 },
                { "type": "click", "id": "faq", "item": 2 },
                { "type": "assert_active", "id": "faq", "index": null }
            ]
        }"#,
    );
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);
}

#[test]
fn invalid_submission_fails_with_the_form_error() {
    let report = run(
        r#"{
            "page": "contact",
            "steps": [
                { "type": "fill", "id": "contact-form", "field": "name", "value": "Ada" },
                { "type": "submit", "id": "contact-form" }
            ]
        }"#,
    );
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.message.as_deref(), Some("Email is required"));
}

#[test]
fn resource_download_is_reported() {
    let report = run(
        r#"{
            "page": "resources",
            "steps": [
                { "type": "click", "id": "asset-framework" },
                {
                    "type": "assert_last_action",
                    "expected": {
                        "action": "download",
                        "path": "/resources/data-quality-framework.pdf"
                    }
                }
            ]
        }"#,
    );
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);
}

#[test]
fn system_preference_follows_the_environment() {
    let mut config = AttestConfig::default();
    config.theme.preference = ThemePreference::System;
    let scenario = Scenario::from_json(
        r#"{ "steps": [{ "type": "assert_scheme", "scheme": "dark" }] }"#,
    )
    .unwrap();
    let report = Runner::new(config)
        .with_environment(Arc::new(FixedScheme(ColorScheme::Dark)))
        .run(&scenario)
        .unwrap();
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);
    assert_eq!(report.snapshot.scheme, ColorScheme::Dark);
}

#[test]
fn report_serializes_for_tooling() {
    let report = run(r#"{ "page": "about", "steps": [{ "type": "tick", "frames": 3 }] }"#);
    let mut out = Vec::new();
    report.write_to_writer(&mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["status"], "passed");
    assert_eq!(json["page"], "about");
    assert_eq!(json["elapsed_frames"], 3);
    assert!(json["failed_step_index"].is_null());
    assert!(json["snapshot"]["elements"].as_array().is_some_and(|e| !e.is_empty()));
}

#[test]
fn report_paths_must_stay_relative() {
    let report = run(r#"{ "steps": [] }"#);
    assert!(report.write_to_path(std::path::Path::new("/tmp/report.json")).is_err());
    assert!(report.write_to_path(std::path::Path::new("../report.json")).is_err());
}
