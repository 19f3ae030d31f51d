//! Rendering of the form tree.

pub mod runtime;

/// HTML specific modules are grouped under writer::html
pub mod html;
pub use self::html::{HtmlWriteError, HtmlWriteResult, HtmlWriter, HtmlWriterOptions};

pub use self::runtime::diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, SharedVecSink,
};
pub use self::runtime::visitor::{NodeHandler, walk_node};
