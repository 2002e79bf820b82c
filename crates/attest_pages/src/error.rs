//! Page and form errors

use crate::contact::FormField;
use thiserror::Error;

/// Contact form validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),

    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),

    #[error("the form is already being submitted")]
    AlreadySubmitting,
}

/// Errors raised while driving a page
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    #[error("unknown page `{0}`")]
    UnknownPage(String),

    #[error("page `{page}` has no element `{element}`")]
    UnknownElement { page: String, element: String },

    #[error("element `{element}` does not support {action}")]
    Unsupported {
        element: String,
        action: &'static str,
    },

    #[error("element `{element}` needs an item index for {action}")]
    MissingItem {
        element: String,
        action: &'static str,
    },

    #[error("unknown form field `{0}`")]
    UnknownField(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

pub type Result<T> = std::result::Result<T, PageError>;
