//! Classification of candidate rows.
//!
//! Every step derives its result from the markup, so classifying an already
//! classified row changes nothing: a converted row has no checkbox left,
//! classes are only added when missing, and an existing delete anchor is
//! reused.

use formset_dom::{HtmlElement, Node};

use crate::affordance::insert_delete_affordance;
use crate::index::ROW_CHILD_TAGS;
use crate::options::{FormsetConfig, TEMPLATE_CLASS};
use crate::row::RowState;

const DELETE_SUFFIX: &str = "-DELETE";

/// Value of a set soft-delete control.
pub const DELETED_VALUE: &str = "on";

fn has_delete_id(el: &HtmlElement) -> bool {
    el.attr("id").is_some_and(|id| id.ends_with(DELETE_SUFFIX))
}

/// Whether `el` is the checkbox Django renders for `can_delete` formsets.
pub fn is_delete_checkbox(el: &HtmlElement) -> bool {
    el.is_input_of_type("checkbox") && has_delete_id(el)
}

/// Whether `el` is a hidden soft-delete control.
pub fn is_soft_delete_control(el: &HtmlElement) -> bool {
    el.is_input_of_type("hidden") && has_delete_id(el)
}

/// The soft-delete control of `row`, if it has one.
pub fn soft_delete_control(row: &HtmlElement) -> Option<&HtmlElement> {
    row.find_descendant(&is_soft_delete_control)
}

/// Mutable counterpart of [`soft_delete_control`].
pub fn soft_delete_control_mut(row: &mut HtmlElement) -> Option<&mut HtmlElement> {
    row.find_descendant_mut(&is_soft_delete_control)
}

/// Whether the soft-delete control of `row` holds a value.
pub fn is_marked_deleted(row: &HtmlElement) -> bool {
    soft_delete_control(row)
        .and_then(HtmlElement::value)
        .is_some_and(|value| !value.trim().is_empty())
}

/// Whether `row` has at least one descendant that makes it a form row.
pub fn has_child_fields(row: &HtmlElement) -> bool {
    row.has_descendant(&|el| el.tag_matches_any(ROW_CHILD_TAGS))
}

/// Replaces a delete checkbox with a hidden control carrying its `name`
/// and `id`, valued `on` when the checkbox was checked. Labels bound to the
/// checkbox are hidden.
///
/// Returns whether a checkbox was converted.
pub fn convert_delete_checkbox(row: &mut HtmlElement) -> bool {
    let Some(checkbox) = row.find_descendant(&is_delete_checkbox) else {
        return false;
    };
    let id = checkbox.attr("id").unwrap_or_default().to_owned();
    let mut hidden = HtmlElement::new("input")
        .with_attribute("type", "hidden")
        .with_attribute("name", checkbox.attr("name").unwrap_or_default())
        .with_attribute("id", &id)
        .self_closing(true);
    if checkbox.is_checked() {
        hidden.set_attr("value", DELETED_VALUE);
    }

    if let Some(slot) = row.find_descendant_mut(&is_delete_checkbox) {
        *slot = hidden;
    }
    row.for_each_descendant_mut(&mut |el| {
        if el.is("label") && el.attr("for") == Some(id.as_str()) {
            el.hide();
        }
    });
    true
}

/// The outcome of classifying one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A form row with its initial state.
    Row(HtmlElement, RowState),
    /// A candidate kept verbatim and never counted: one without form
    /// descendants, a marked template, or a hidden row not marked deleted.
    Inert(Node),
}

/// Classifies a candidate: converts its delete checkbox, rejects it when it
/// has no form descendants, marks it as managed, and hides it when its
/// soft-delete control is already set.
///
/// Template-marked candidates and rows that start hidden without a set
/// soft-delete control stay inert.
pub fn classify(candidate: Node, config: &FormsetConfig) -> Classified {
    let mut element = match candidate {
        Node::Element(element) if element.has_class(TEMPLATE_CLASS) => {
            return Classified::Inert(element.into());
        }
        Node::Element(element) => element,
        other => return Classified::Inert(other),
    };
    let hidden = element.is_hidden().then(|| element.clone());
    convert_delete_checkbox(&mut element);
    if !has_child_fields(&element) {
        return Classified::Inert(element.into());
    }

    if is_marked_deleted(&element) {
        config.form_class.apply(&mut element);
        element.hide();
        return Classified::Row(element, RowState::SoftDeleted);
    }
    if let Some(original) = hidden {
        return Classified::Inert(original.into());
    }
    config.form_class.apply(&mut element);
    Classified::Row(element, RowState::Active)
}

/// Applies the alternating class for `ordinal` and, when the row carries a
/// soft-delete control, a delete anchor. Rows persisted without a delete
/// control cannot be removed and get no anchor.
pub fn decorate(element: &mut HtmlElement, config: &FormsetConfig, ordinal: usize) {
    config.apply_extra_classes(element, ordinal);
    if soft_delete_control(element).is_some() {
        insert_delete_affordance(config, element);
    }
}
