//! Error handling for formset setup and rendering.
//!
//! Transitions never fail once a [`crate::Formset`] is built; errors are
//! confined to resolving options and rendering markup.

use ecow::EcoString;
use formset_dom::{HtmlWriteError, SelectorError};
use std::error::Error;
use std::fmt::{self, Display};

/// Errors that can occur while setting up or rendering a formset.
#[derive(Debug)]
pub enum FormsetError {
    /// A selector-valued option could not be parsed.
    InvalidSelector {
        /// The option holding the selector, e.g. `keepFieldValues`
        option: &'static str,
        /// The parse failure
        source: SelectorError,
    },
    /// The prefix could not be turned into an identifying-attribute pattern.
    InvalidPrefix {
        /// The configured prefix
        prefix: EcoString,
        /// The pattern compilation failure
        source: regex::Error,
    },
    /// `formTemplate` is set but matched no element.
    TemplateNotFound(EcoString),
    /// An error occurred while writing the rendered collection.
    Render(HtmlWriteError),
}

impl Display for FormsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormsetError::InvalidSelector { option, source } => {
                write!(f, "Invalid selector in option `{option}`: {source}")
            }
            FormsetError::InvalidPrefix { prefix, source } => {
                write!(f, "Invalid formset prefix '{prefix}': {source}")
            }
            FormsetError::TemplateNotFound(selector) => {
                write!(f, "Form template '{selector}' did not match any element")
            }
            FormsetError::Render(err) => write!(f, "Error during HTML rendering: {err}"),
        }
    }
}

impl Error for FormsetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FormsetError::InvalidSelector { source, .. } => Some(source),
            FormsetError::InvalidPrefix { source, .. } => Some(source),
            FormsetError::TemplateNotFound(_) => None,
            FormsetError::Render(err) => Some(err),
        }
    }
}

// Allow converting HtmlWriteError into FormsetError for convenience when using `?`
impl From<HtmlWriteError> for FormsetError {
    fn from(err: HtmlWriteError) -> Self {
        FormsetError::Render(err)
    }
}

/// Result type alias for formset operations.
pub type FormsetResult<T> = Result<T, FormsetError>;
