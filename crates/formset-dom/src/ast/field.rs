//! Form-control helpers on [`HtmlElement`].
//!
//! Values are read from and written to the markup itself: the `value` and
//! `checked` attributes of inputs, the text of textareas, and the `selected`
//! flag of options.

use ecow::EcoString;

use super::{HtmlElement, Node};
use crate::writer::runtime::visitor::{NodeHandler, walk_node};

/// Tags that carry a submittable value.
const FORM_CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];

impl HtmlElement {
    /// Whether this element is an `input`, `select` or `textarea`.
    pub fn is_form_control(&self) -> bool {
        self.tag_matches_any(FORM_CONTROL_TAGS)
    }

    /// The lowercased `type` of an input; `text` when absent. `None` for
    /// non-input elements.
    pub fn input_type(&self) -> Option<EcoString> {
        if !self.is("input") {
            return None;
        }
        Some(
            self.attr("type")
                .map(|ty| EcoString::from(ty.trim().to_ascii_lowercase()))
                .unwrap_or_else(|| EcoString::from("text")),
        )
    }

    /// Whether this is an input of the given type.
    pub fn is_input_of_type(&self, ty: &str) -> bool {
        self.input_type().is_some_and(|t| t.as_str() == ty)
    }

    /// Whether this is a checkbox or radio input.
    pub fn is_checkable(&self) -> bool {
        self.input_type()
            .is_some_and(|ty| matches!(ty.as_str(), "checkbox" | "radio"))
    }

    /// Whether the `checked` attribute is present.
    pub fn is_checked(&self) -> bool {
        self.has_attr("checked")
    }

    /// Sets or clears the `checked` attribute.
    pub fn set_checked(&mut self, checked: bool) {
        if checked {
            self.set_attr("checked", "checked");
        } else {
            self.remove_attr("checked");
        }
    }

    /// The current value of a form control.
    ///
    /// Inputs report their `value` attribute, textareas their text content,
    /// and selects the value of the first selected option. Other elements
    /// report `None`.
    pub fn value(&self) -> Option<EcoString> {
        if self.is("input") {
            Some(self.attr("value").unwrap_or_default().into())
        } else if self.is("textarea") {
            Some(self.text_content())
        } else if self.is("select") {
            self.find_descendant(&|el| el.is("option") && el.has_attr("selected"))
                .map(option_value)
        } else {
            None
        }
    }

    /// Sets the value of a form control; a no-op on other elements.
    ///
    /// On a select, every option whose value equals `value` becomes selected
    /// and all others are deselected, so an unmatched value leaves nothing
    /// selected.
    pub fn set_value(&mut self, value: &str) {
        if self.is("input") {
            self.set_attr("value", value);
        } else if self.is("textarea") {
            self.children.clear();
            if !value.is_empty() {
                self.children.push(Node::text(value));
            }
        } else if self.is("select") {
            self.for_each_descendant_mut(&mut |el| {
                if el.is("option") {
                    let selected = option_value(el).as_str() == value;
                    el.set_attr_flag("selected", selected);
                }
            });
        }
    }

    /// Resets the control: checkable inputs are unchecked, everything else is
    /// set to the empty value.
    pub fn clear_value(&mut self) {
        if self.is_checkable() {
            self.set_checked(false);
        } else {
            self.set_value("");
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> EcoString {
        let mut collector = TextCollector::default();
        for child in &self.children {
            let _ = walk_node(&mut collector, child);
        }
        collector.buffer
    }

    fn set_attr_flag(&mut self, name: &str, on: bool) {
        if on {
            self.set_attr(name, name);
        } else {
            self.remove_attr(name);
        }
    }
}

/// The submitted value of an `option`: its `value` attribute, falling back to
/// its text.
fn option_value(option: &HtmlElement) -> EcoString {
    match option.attr("value") {
        Some(value) => value.into(),
        None => option.text_content().trim().into(),
    }
}

#[derive(Default)]
struct TextCollector {
    buffer: EcoString,
}

impl NodeHandler for TextCollector {
    type Error = std::convert::Infallible;

    fn text(&mut self, text: &EcoString) -> Result<(), Self::Error> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn element(&mut self, element: &HtmlElement) -> Result<(), Self::Error> {
        self.visit_nodes(&element.children)
    }
}
