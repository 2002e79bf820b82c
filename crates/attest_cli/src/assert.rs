//! Assertion helpers for headless scenarios

use attest_pages::{Element, Page, SiteAction};
use attest_theme::ColorScheme;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_text_contains(page: &Page, id: Option<&str>, expected: &str) -> AssertionResult {
    let text = match id {
        Some(id) => match page.node(id) {
            Ok(node) => node.visible_text().join(" "),
            Err(_) => {
                return AssertionResult::failed(
                    "missing_element",
                    format!("{id}: element not found"),
                )
            }
        },
        None => page.visible_text().join(" "),
    };
    if text.contains(expected) {
        AssertionResult::Passed
    } else {
        let scope = id.unwrap_or(page.route().name());
        AssertionResult::failed(
            "text_mismatch",
            format!("{scope}: expected substring '{expected}', got '{text}'"),
        )
    }
}

pub fn evaluate_active(page: &Page, id: &str, expected: Option<usize>) -> AssertionResult {
    let Ok(node) = page.node(id) else {
        return AssertionResult::failed("missing_element", format!("{id}: element not found"));
    };
    let Element::Selection { panel, .. } = &node.element else {
        return AssertionResult::failed("not_selectable", format!("{id}: not a selection panel"));
    };
    if panel.active() == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "active_mismatch",
            format!("{id}: expected active {expected:?}, got {:?}", panel.active()),
        )
    }
}

pub fn evaluate_last_action(page: &Page, expected: &SiteAction) -> AssertionResult {
    match page.actions().last() {
        Some(action) if action == expected => AssertionResult::Passed,
        Some(action) => AssertionResult::failed(
            "action_mismatch",
            format!("expected {expected:?}, got {action:?}"),
        ),
        None => AssertionResult::failed("no_action", format!("expected {expected:?}, got nothing")),
    }
}

pub fn evaluate_scheme(actual: ColorScheme, expected: ColorScheme) -> AssertionResult {
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "scheme_mismatch",
            format!("expected {expected} scheme, got {actual}"),
        )
    }
}
