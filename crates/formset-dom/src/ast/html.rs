//! HTML element definitions and utilities for the form tree.
//!
//! This module contains definitions for HTML elements and attributes, along
//! with helpers for class lists, inline visibility and subtree queries.

use super::Node;
use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// HTML attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlAttribute {
    /// Attribute name
    pub name: EcoString,
    /// Attribute value
    pub value: EcoString,
}

/// HTML element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlElement {
    /// HTML tag name
    pub tag: EcoString,
    /// HTML attributes, in source order
    #[serde(default)]
    pub attributes: Vec<HtmlAttribute>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<Node>,
    /// Whether this is a self-closing element
    #[serde(default)]
    pub self_closing: bool,
}

impl HtmlElement {
    /// Create a new HTML element
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Add an attribute to the HTML element
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(HtmlAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add child nodes to the HTML element
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Append a single child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Set whether the element is self-closing
    pub fn self_closing(mut self, is_self_closing: bool) -> Self {
        self.self_closing = is_self_closing;
        self
    }

    /// Check if this element's tag matches any in the provided list (case-insensitive)
    pub fn tag_matches_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| tag.eq_ignore_ascii_case(&self.tag))
    }

    /// Check if this element has the given tag (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    // --- Attributes ---

    /// Gets the value of an attribute (names compare case-insensitively).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    /// Whether the attribute is present, regardless of its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Sets an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<EcoString>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(HtmlAttribute {
                name: name.into(),
                value,
            }),
        }
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<EcoString> {
        let pos = self
            .attributes
            .iter()
            .position(|attr| attr.name.eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(pos).value)
    }

    // --- Classes ---

    /// Iterates the whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                let mut joined = EcoString::from(existing.trim_end());
                joined.push(' ');
                joined.push_str(class);
                joined
            }
            _ => class.into(),
        };
        self.set_attr("class", joined);
    }

    /// Removes every occurrence of a class; drops the attribute when it
    /// becomes empty.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if kept.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", kept);
        }
    }

    // --- Inline visibility ---

    /// Whether the inline style hides this element (`display: none`).
    pub fn is_hidden(&self) -> bool {
        style_declarations(self.attr("style").unwrap_or_default())
            .any(|(prop, value)| prop.eq_ignore_ascii_case("display") && value == "none")
    }

    /// Hides the element with an inline `display: none`.
    pub fn hide(&mut self) {
        if self.is_hidden() {
            return;
        }
        let mut style = self
            .attr("style")
            .map(|s| s.trim().trim_end_matches(';').trim_end())
            .map(EcoString::from)
            .unwrap_or_default();
        if !style.is_empty() {
            style.push_str("; ");
        }
        style.push_str("display: none");
        self.set_attr("style", style);
    }

    /// Drops any inline `display` declaration; removes the `style` attribute
    /// when nothing else remains.
    pub fn show(&mut self) {
        let Some(style) = self.attr("style") else {
            return;
        };
        let kept = style_declarations(style)
            .filter(|(prop, _)| !prop.eq_ignore_ascii_case("display"))
            .map(|(prop, value)| format!("{prop}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        if kept.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", kept);
        }
    }

    /// Shows or hides the element.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    // --- Children and subtree queries ---

    /// Iterates the direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &HtmlElement> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Returns the last direct child element.
    pub fn last_child_element_mut(&mut self) -> Option<&mut HtmlElement> {
        self.children.iter_mut().rev().find_map(Node::as_element_mut)
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Finds the first descendant element (pre-order, self excluded)
    /// satisfying `pred`.
    pub fn find_descendant(&self, pred: &impl Fn(&HtmlElement) -> bool) -> Option<&HtmlElement> {
        self.children.iter().find_map(|child| child.find(pred))
    }

    /// Mutable counterpart of [`Self::find_descendant`].
    pub fn find_descendant_mut(
        &mut self,
        pred: &impl Fn(&HtmlElement) -> bool,
    ) -> Option<&mut HtmlElement> {
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(pred))
    }

    /// Whether any descendant satisfies `pred`.
    pub fn has_descendant(&self, pred: &impl Fn(&HtmlElement) -> bool) -> bool {
        self.find_descendant(pred).is_some()
    }

    /// Visits every descendant element in document order. The callback runs
    /// on a parent before its children.
    pub fn for_each_descendant_mut(&mut self, f: &mut impl FnMut(&mut HtmlElement)) {
        for_each_element_mut(&mut self.children, f);
    }

    /// Removes every descendant element satisfying `pred`, together with its
    /// subtree. Returns the number of removed elements.
    pub fn remove_descendants(&mut self, pred: &impl Fn(&HtmlElement) -> bool) -> usize {
        remove_elements(&mut self.children, pred)
    }
}

fn for_each_element_mut(nodes: &mut [Node], f: &mut impl FnMut(&mut HtmlElement)) {
    for node in nodes {
        match node {
            Node::Element(element) => {
                f(element);
                for_each_element_mut(&mut element.children, &mut *f);
            }
            Node::Fragment(children) => for_each_element_mut(children, &mut *f),
            Node::Text(_) => {}
        }
    }
}

fn remove_elements(nodes: &mut Vec<Node>, pred: &impl Fn(&HtmlElement) -> bool) -> usize {
    let before = nodes.len();
    nodes.retain(|node| !node.as_element().is_some_and(pred));
    let mut removed = before - nodes.len();
    for node in nodes.iter_mut() {
        match node {
            Node::Element(element) => removed += remove_elements(&mut element.children, pred),
            Node::Fragment(children) => removed += remove_elements(children, pred),
            Node::Text(_) => {}
        }
    }
    removed
}

/// Splits an inline style into `(property, value)` pairs, skipping empty or
/// malformed declarations.
fn style_declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim();
        (!prop.is_empty()).then(|| (prop, value.trim()))
    })
}
