use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};
use attest_animation::StaggerFrom;
use attest_widgets::{RevealConfig, RotatingTextConfig};

const INDUSTRIES: [(&str, &str); 4] = [
    (
        "Financial Services",
        "Reconcile ledgers, trade feeds and regulatory reports against a single audited record, \
        with lineage an examiner can follow.",
    ),
    (
        "Healthcare",
        "Validate clinical and claims data at intake so downstream analytics and reporting start \
        from records you can defend.",
    ),
    (
        "Public Sector",
        "Certify published datasets with documented quality checks, retention rules and a review \
        trail for every release.",
    ),
    (
        "Retail & Supply Chain",
        "Catch duplicate, stale and mismatched product and inventory records before they reach \
        forecasting and replenishment.",
    ),
];

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.particles("hero-particles", 60)
        .hero("hero", "Data you can stand behind.")
        .rotating(
            "hero-verbs",
            &["Trust.", "Govern.", "Certify."],
            RotatingTextConfig::default()
                .interval(2500)
                .stagger(25.0, StaggerFrom::Last),
        )
        .paragraph(
            "hero-lede",
            "Attest audits, governs and certifies the data your decisions depend on.",
        )
        .magnetic_button("get-started", "Get Started", SiteAction::navigate(Route::Contact))
        .button(
            "explore-platform",
            "Explore the Platform",
            SiteAction::navigate(Route::Platform),
        )
        .reveal(
            "mission",
            "Most data problems are discovered by the people who trusted the data. We find them \
            first.",
        )
        .heading("industries-heading", "Industries we serve")
        .tabs("industries", &INDUSTRIES)
        .reveal_with(
            "pillars",
            "Assess. Remediate. Monitor. Certify.",
            RevealConfig::scale_in().delay(100),
        )
        .card(
            "card-assessment",
            "Data Quality Assessment",
            Some(SiteAction::navigate(Route::Solutions)),
        )
        .card(
            "card-governance",
            "Governance Programs",
            Some(SiteAction::navigate(Route::Solutions)),
        )
        .card(
            "card-certification",
            "Dataset Certification",
            Some(SiteAction::navigate(Route::Platform)),
        )
        .reveal(
            "testimonial",
            "\"Attest gave our regulators an answer before they finished the question.\"",
        )
        .button("cta-contact", "Talk to an expert", SiteAction::navigate(Route::Contact));
}
