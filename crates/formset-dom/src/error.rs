//! Error handling for selector parsing.

use ecow::EcoString;
use std::error::Error;
use std::fmt::{self, Display};

/// Errors that can occur while parsing a [`crate::Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector ended where a name or value was expected.
    UnexpectedEnd(EcoString),
    /// A character that cannot start or continue the current component.
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Byte offset in the selector source
        offset: usize,
        /// The selector source
        source: EcoString,
    },
    /// A combinator (descendant, child or sibling) was used; only compound
    /// selectors are supported.
    UnsupportedCombinator(EcoString),
    /// A comma-separated list contained an empty entry.
    EmptyCompound(EcoString),
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::UnexpectedEnd(source) => {
                write!(f, "Unexpected end of selector: '{source}'")
            }
            SelectorError::UnexpectedChar { ch, offset, source } => {
                write!(
                    f,
                    "Unexpected character '{ch}' at offset {offset} in selector '{source}'"
                )
            }
            SelectorError::UnsupportedCombinator(source) => write!(
                f,
                "Unsupported combinator in selector '{source}'. Only compound selectors (tag, #id, .class, [attr]) are supported."
            ),
            SelectorError::EmptyCompound(source) => {
                write!(f, "Empty entry in selector list: '{source}'")
            }
        }
    }
}

impl Error for SelectorError {}

/// Result type alias for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;
