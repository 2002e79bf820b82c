use super::CONTACT_FORM;
use crate::page::PageBuilder;

const FAQ: [(&str, &str); 4] = [
    (
        "How long does an assessment take?",
        "Most assessments run four to six weeks from kickoff to a written findings report.",
    ),
    (
        "Do you need access to production systems?",
        "No. We work from read-only extracts or a staging copy under your access controls.",
    ),
    (
        "Can you work with our existing tooling?",
        "Yes. Findings and monitoring rules are delivered in formats your current stack can run.",
    ),
    (
        "What does certification cover?",
        "A certified dataset has documented checks, an owner, a refresh cadence and a reviewed \
        exception log.",
    ),
];

pub(super) fn build(page: &mut PageBuilder<'_>) {
    page.heading("contact-heading", "Get in touch")
        .paragraph(
            "contact-lede",
            "Tell us about your data and what depends on it. We reply within one business day.",
        )
        .contact_form(CONTACT_FORM)
        .heading("faq-heading", "Frequently asked questions")
        .accordion("faq", &FAQ);
}
