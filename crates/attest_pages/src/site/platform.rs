use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};
use attest_widgets::{RevealConfig, TypingConfig};

const PHASES: [(&str, &str); 4] = [
    (
        "Discover",
        "Profile every source, map lineage and record the checks each downstream consumer relies \
        on.",
    ),
    (
        "Assess",
        "Score completeness, accuracy, timeliness and consistency against agreed thresholds.",
    ),
    (
        "Remediate",
        "Fix root causes at the source and add guards so the same defect cannot return silently.",
    ),
    (
        "Certify",
        "Publish certified datasets with owners, service levels and an auditable exception log.",
    ),
];

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.particles("platform-particles", 40)
        .hero("platform-hero", "The Attest Platform")
        .typing(
            "platform-typing",
            &["Profile.", "Validate.", "Monitor."],
            TypingConfig::default().speeds(60, 40),
        )
        .heading("lifecycle-heading", "The data quality lifecycle")
        .tabs("lifecycle", &PHASES)
        .reveal_with(
            "monitoring",
            "Continuous monitoring turns one-time findings into standing guarantees.",
            RevealConfig::fade_up(40.0).margin(-80.0),
        )
        .card("feature-lineage", "Lineage Mapping", None)
        .card("feature-rules", "Rule Library", None)
        .card("feature-alerts", "Quality Alerts", None)
        .magnetic_button("platform-demo", "Request a demo", SiteAction::navigate(Route::Contact));
}
