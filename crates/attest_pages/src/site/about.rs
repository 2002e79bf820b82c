use crate::page::PageBuilder;
use crate::route::{Route, SiteAction};
use attest_widgets::{RevealConfig, TypingConfig};

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.hero("about-hero", "About Attest")
        .typing(
            "about-typing",
            &["Independent.", "Rigorous.", "Accountable."],
            TypingConfig::default(),
        )
        .reveal(
            "story",
            "Attest was founded by auditors and data engineers who kept meeting the same problem \
            from opposite sides of the table.",
        )
        .reveal_with(
            "values",
            "We measure before we recommend, document what we measure and certify only what we \
            can prove.",
            RevealConfig::fade_up(24.0).delay(150),
        )
        .heading("team-heading", "Leadership")
        .card("team-practice", "Practice Leadership", None)
        .card("team-engineering", "Engineering", None)
        .card("team-assurance", "Assurance", None)
        .button("about-contact", "Work with us", SiteAction::navigate(Route::Contact));
}
