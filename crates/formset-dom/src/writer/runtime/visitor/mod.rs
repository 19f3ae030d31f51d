//! Shared traversal utilities for the form tree.
//!
//! The goal of this module is to provide a single dispatch table for the
//! `Node` enum so that the HTML writer and the text collectors can implement
//! `NodeHandler` and reuse the traversal logic.

use crate::ast::{HtmlElement, Node};
use ecow::EcoString;

/// Trait implemented by consumers that walk the form tree.
pub trait NodeHandler {
    /// Error type produced during traversal.
    type Error;

    /// Dispatch a single node. Most implementers will not override this and
    /// will instead implement the per-variant methods below.
    fn visit_node(&mut self, node: &Node) -> Result<(), Self::Error> {
        walk_node(self, node)
    }

    /// Visit a sequence of nodes.
    fn visit_nodes(&mut self, nodes: &[Node]) -> Result<(), Self::Error> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    /// Visit the children of a fragment.
    fn fragment(&mut self, children: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(children)
    }

    /// Visit an element. The default does not descend into its children.
    fn element(&mut self, _element: &HtmlElement) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a text node.
    fn text(&mut self, _text: &EcoString) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Dispatch a single node to the provided handler.
pub fn walk_node<H: NodeHandler + ?Sized>(handler: &mut H, node: &Node) -> Result<(), H::Error> {
    match node {
        Node::Fragment(children) => handler.fragment(children),
        Node::Element(element) => handler.element(element),
        Node::Text(text) => handler.text(text),
    }
}
