//! Node definitions for the form tree.

use super::html::HtmlElement;
use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// Main node type, representing one item of a form document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    /// A sequence of sibling nodes without a wrapping element
    Fragment(Vec<Node>),
    /// An HTML element
    Element(HtmlElement),
    /// Plain text, escaped on output
    Text(EcoString),
}

impl Default for Node {
    fn default() -> Self {
        Node::Fragment(vec![])
    }
}

impl From<HtmlElement> for Node {
    fn from(element: HtmlElement) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Create a text node
    pub fn text<S: Into<EcoString>>(text: S) -> Self {
        Node::Text(text.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut HtmlElement> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Find the first element in this subtree (pre-order, self included)
    /// satisfying `pred`.
    pub fn find(&self, pred: &impl Fn(&HtmlElement) -> bool) -> Option<&HtmlElement> {
        match self {
            Node::Fragment(children) => children.iter().find_map(|child| child.find(pred)),
            Node::Element(element) if pred(element) => Some(element),
            Node::Element(element) => element.find_descendant(pred),
            Node::Text(_) => None,
        }
    }

    /// Mutable counterpart of [`Self::find`].
    pub fn find_mut(&mut self, pred: &impl Fn(&HtmlElement) -> bool) -> Option<&mut HtmlElement> {
        match self {
            Node::Fragment(children) => children.iter_mut().find_map(|child| child.find_mut(pred)),
            Node::Element(element) => {
                if pred(element) {
                    Some(element)
                } else {
                    element.find_descendant_mut(pred)
                }
            }
            Node::Text(_) => None,
        }
    }

    /// Collect every element in this subtree (self included) satisfying `pred`,
    /// in document order.
    pub fn find_all(&self, pred: &impl Fn(&HtmlElement) -> bool) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        self.collect_into(pred, &mut found);
        found
    }

    fn collect_into<'a>(
        &'a self,
        pred: &impl Fn(&HtmlElement) -> bool,
        found: &mut Vec<&'a HtmlElement>,
    ) {
        match self {
            Node::Fragment(children) => {
                for child in children {
                    child.collect_into(pred, found);
                }
            }
            Node::Element(element) => {
                if pred(element) {
                    found.push(element);
                }
                for child in &element.children {
                    child.collect_into(pred, found);
                }
            }
            Node::Text(_) => {}
        }
    }
}
