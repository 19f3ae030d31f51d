//! Add and delete affordances.
//!
//! Affordances are `javascript:void(0)` anchors carrying the configured
//! class and text. Hiding an affordance sets `display: none` on the anchor
//! (or, for tables, on the row wrapping the add anchor).

use formset_dom::{HtmlElement, Node};

use crate::options::{ClassList, FormsetConfig};
use crate::row::RowLayout;

const VOID_HREF: &str = "javascript:void(0)";

fn anchor(classes: &ClassList, text: &str) -> HtmlElement {
    HtmlElement::new("a")
        .with_attribute("class", &classes.to_attr())
        .with_attribute("href", VOID_HREF)
        .with_child(Node::text(text))
}

fn is_delete_anchor(config: &FormsetConfig, el: &HtmlElement) -> bool {
    el.is("a") && config.delete_class.matches(el)
}

/// Whether `row` already carries a delete anchor.
pub fn has_delete_affordance(config: &FormsetConfig, row: &HtmlElement) -> bool {
    row.has_descendant(&|el| is_delete_anchor(config, el))
}

/// Inserts a delete anchor into `row` unless one is already present.
pub fn insert_delete_affordance(config: &FormsetConfig, row: &mut HtmlElement) {
    if has_delete_affordance(config, row) {
        return;
    }
    let anchor = anchor(&config.delete_class, &config.delete_text);
    match RowLayout::of(row) {
        RowLayout::TableRow => match row.last_child_element_mut() {
            Some(cell) => cell.push_child(anchor),
            None => row.push_child(HtmlElement::new("td").with_child(anchor)),
        },
        RowLayout::List => row.push_child(HtmlElement::new("li").with_child(anchor)),
        RowLayout::Container => row.push_child(anchor),
    }
}

/// Removes every delete anchor from `row`, together with list items that
/// only wrapped one.
pub fn remove_delete_affordance(config: &FormsetConfig, row: &mut HtmlElement) {
    row.remove_descendants(&|el| {
        el.is("li")
            && el.child_elements().count() == 1
            && el.child_elements().all(|child| is_delete_anchor(config, child))
    });
    row.remove_descendants(&|el| is_delete_anchor(config, el));
}

/// Shows or hides the delete anchors of `row`.
pub fn set_delete_visible(config: &FormsetConfig, row: &mut HtmlElement, visible: bool) {
    row.for_each_descendant_mut(&mut |el| {
        if is_delete_anchor(config, el) {
            el.set_visible(visible);
        }
    });
}

/// The add affordance placed after the rows.
///
/// Table layouts wrap the anchor in a `tr` spanning `columns` cells.
pub fn add_affordance(
    config: &FormsetConfig,
    layout: RowLayout,
    columns: usize,
    visible: bool,
) -> HtmlElement {
    let anchor = anchor(&config.add_class, &config.add_text);
    let mut affordance = match layout {
        RowLayout::TableRow => HtmlElement::new("tr")
            .with_attribute("class", &config.add_row_class.to_attr())
            .with_child(
                HtmlElement::new("td")
                    .with_attribute("colspan", &columns.to_string())
                    .with_child(anchor),
            ),
        RowLayout::List | RowLayout::Container => anchor,
    };
    affordance.set_visible(visible);
    affordance
}
