use ecow::EcoString;
use std::fmt::{self, Display};

/// Errors that can occur while rendering the form tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlWriteError {
    /// A tag name that cannot be written as markup.
    InvalidTag(EcoString),
    /// An attribute name that cannot be written as markup.
    InvalidAttribute {
        /// Tag of the element carrying the attribute
        tag: EcoString,
        /// The rejected attribute name
        name: EcoString,
    },
    /// A start-tag operation was attempted with no start tag open.
    NoOpenTag(&'static str),
}

impl Display for HtmlWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlWriteError::InvalidTag(tag) => write!(f, "Invalid HTML tag name: {tag}"),
            HtmlWriteError::InvalidAttribute { tag, name } => {
                write!(f, "Invalid HTML attribute name on <{tag}>: {name}")
            }
            HtmlWriteError::NoOpenTag(operation) => {
                write!(f, "Cannot write {operation}: no start tag is open")
            }
        }
    }
}

impl std::error::Error for HtmlWriteError {}

/// Result type alias for HTML writer operations.
pub type HtmlWriteResult<T> = Result<T, HtmlWriteError>;
