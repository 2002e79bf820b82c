use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};
use attest_widgets::RevealConfig;

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.hero("partners-hero", "Partners")
        .reveal(
            "partners-lede",
            "We work alongside cloud, warehouse and governance vendors so quality checks live \
            where your data already does.",
        )
        .card("partner-cloud", "Cloud Platforms", None)
        .card("partner-warehouse", "Warehouses & Lakehouses", None)
        .card("partner-governance", "Catalog & Governance", None)
        .reveal_with(
            "partner-program",
            "Our partner program pairs your implementation team with certified Attest reviewers.",
            RevealConfig::scale_in(),
        )
        .button("become-partner", "Become a partner", SiteAction::navigate(Route::Contact));
}
