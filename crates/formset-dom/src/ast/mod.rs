//! Tree structure of a form document.
//!
//! This module defines the node types a formset operates over: elements,
//! text and fragments, together with helpers for classes, inline visibility
//! and form-field values.

mod field;
mod html;
mod node;

pub use self::html::{HtmlAttribute, HtmlElement};
pub use self::node::Node;

#[cfg(test)]
mod tests;
