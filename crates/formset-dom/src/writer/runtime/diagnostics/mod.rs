//! Findings of the writer in lenient mode.
//!
//! Elements with names that cannot be written as markup are textualized
//! instead of failing the render. Each one is reported to a
//! [`DiagnosticSink`] as well as logged.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ecow::EcoString;

use crate::ast::HtmlElement;
use crate::writer::html::HtmlWriteError;

/// Why an element was textualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The tag name is not a valid HTML name.
    InvalidTag,
    /// An attribute name is not a valid HTML name.
    InvalidAttribute,
}

/// An element written as escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Why the element was textualized.
    pub kind: DiagnosticKind,
    /// Tag of the element.
    pub tag: EcoString,
    /// The rejected name: the tag itself, or the offending attribute.
    pub name: EcoString,
}

impl Diagnostic {
    pub(crate) fn textualized(element: &HtmlElement, err: &HtmlWriteError) -> Self {
        let (kind, name) = match err {
            HtmlWriteError::InvalidAttribute { name, .. } => {
                (DiagnosticKind::InvalidAttribute, name.clone())
            }
            _ => (DiagnosticKind::InvalidTag, element.tag.clone()),
        };
        Self {
            kind,
            tag: element.tag.clone(),
            name,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::InvalidTag => {
                write!(f, "textualized element with invalid tag name '{}'", self.tag)
            }
            DiagnosticKind::InvalidAttribute => write!(
                f,
                "textualized <{}> with invalid attribute name '{}'",
                self.tag, self.name
            ),
        }
    }
}

/// Receiver of writer diagnostics.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Discards diagnostics; the writer's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _: Diagnostic) {}
}

/// Collects diagnostics into a vector shared with the caller.
#[derive(Debug, Clone, Default)]
pub struct SharedVecSink {
    target: Rc<RefCell<Vec<Diagnostic>>>,
}

impl SharedVecSink {
    /// Collects into `target`.
    pub fn new(target: Rc<RefCell<Vec<Diagnostic>>>) -> Self {
        Self { target }
    }

    /// The shared vector.
    pub fn target(&self) -> Rc<RefCell<Vec<Diagnostic>>> {
        Rc::clone(&self.target)
    }
}

impl DiagnosticSink for SharedVecSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.target.borrow_mut().push(diagnostic);
    }
}
