use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};
use attest_animation::StaggerFrom;
use attest_widgets::{RotatingTextConfig, SplitBy};

const SOLUTIONS: [(&str, &str); 4] = [
    (
        "Data Quality Assessment",
        "A fixed-scope review of your critical datasets with scored findings and a prioritized \
        remediation plan.",
    ),
    (
        "Governance Program Design",
        "Ownership, policies and review cadences sized to your organization, not a template.",
    ),
    (
        "Remediation Sprints",
        "Embedded engineers who fix defects at the source and leave the guards behind.",
    ),
    (
        "Dataset Certification",
        "Independent certification of datasets that regulators, customers or boards rely on.",
    ),
];

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.hero("solutions-hero", "Solutions")
        .rotating(
            "solutions-outcomes",
            &["Fewer surprises", "Faster audits", "Defensible reporting"],
            RotatingTextConfig::default()
                .split_by(SplitBy::Words)
                .stagger(60.0, StaggerFrom::First),
        )
        .accordion("solutions", &SOLUTIONS)
        .reveal(
            "solutions-approach",
            "Every engagement starts with measurement and ends with something you can show an \
            auditor.",
        )
        .magnetic_button(
            "solutions-contact",
            "Start a conversation",
            SiteAction::navigate(Route::Contact),
        );
}
