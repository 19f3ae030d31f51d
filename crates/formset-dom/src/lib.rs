//! Node tree for server-rendered forms.
//!
//! `formset-dom` models the small slice of an HTML document a formset engine
//! works over: elements with ordered attributes, text, and fragments. It also
//! ships a typed simple-selector, form-field value helpers, and an
//! [`HtmlWriter`] that renders a tree back to markup.

// AST related exports
pub use crate::ast::{HtmlAttribute, HtmlElement, Node};

// Error types
pub use crate::error::{SelectorError, SelectorResult};

// Selectors
pub use crate::selector::Selector;

// HTML writer related exports
pub use crate::writer::{
    Diagnostic, DiagnosticKind, DiagnosticSink, HtmlWriteError, HtmlWriteResult, HtmlWriter,
    HtmlWriterOptions, NodeHandler, NullSink, SharedVecSink, walk_node,
};

pub mod ast;
pub mod error;
pub mod selector;
pub mod writer;
