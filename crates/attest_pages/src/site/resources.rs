use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};

const ASSETS: [(&str, &str, &str); 3] = [
    (
        "asset-framework",
        "Data Quality Framework",
        "/resources/data-quality-framework.pdf",
    ),
    (
        "asset-governance",
        "Governance Playbook",
        "/resources/governance-playbook.pdf",
    ),
    (
        "asset-certification",
        "Certification Checklist",
        "/resources/certification-checklist.pdf",
    ),
];

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.heading("resources-heading", "Resources").paragraph(
        "resources-lede",
        "Guides and checklists our teams use on every engagement, free to download.",
    );
    for (id, label, path) in ASSETS {
        page.asset(id, label, path);
    }
    page.reveal(
        "resources-more",
        "Need something tailored to your industry? Ask us for a briefing.",
    )
    .button("resources-contact", "Request a briefing", SiteAction::navigate(Route::Contact));
}
