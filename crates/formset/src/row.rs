//! Rows and slots of a collection.

use std::fmt;

use formset_dom::{HtmlElement, Node};
use serde::Serialize;

/// Stable handle of a managed row; survives renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(pub(crate) u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Classification of a managed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowState {
    /// Visible and counted.
    Active,
    /// Marked deleted through its soft-delete control and hidden; kept in
    /// the tree so the server can delete the underlying record.
    SoftDeleted,
}

/// How rows are laid out, which decides where affordances go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// `tr` rows: delete anchors go in the last cell, the add anchor in a
    /// trailing row.
    TableRow,
    /// `ul`/`ol` rows: delete anchors go in a trailing `li`.
    List,
    /// Anything else: anchors are appended as children.
    Container,
}

impl RowLayout {
    /// The layout implied by a row's tag.
    pub fn of(element: &HtmlElement) -> Self {
        if element.is("tr") {
            RowLayout::TableRow
        } else if element.tag_matches_any(&["ul", "ol"]) {
            RowLayout::List
        } else {
            RowLayout::Container
        }
    }
}

/// A managed row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) element: HtmlElement,
    pub(crate) state: RowState,
    pub(crate) index: usize,
}

impl Row {
    /// The stable handle.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The row's markup.
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Current classification.
    pub fn state(&self) -> RowState {
        self.state
    }

    /// The index last written into the row's fields.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the row is active.
    pub fn is_active(&self) -> bool {
        self.state == RowState::Active
    }

    /// Whether the row's soft-delete control is set.
    pub fn is_marked_deleted(&self) -> bool {
        self.state == RowState::SoftDeleted
    }

    /// Whether the row is rendered visible.
    pub fn is_visible(&self) -> bool {
        !self.element.is_hidden()
    }
}

/// One position of the collection's sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A managed row.
    Row(Row),
    /// A candidate without fields, kept verbatim and never counted.
    Inert(Node),
}

impl Slot {
    /// The row, if this slot holds one.
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Slot::Row(row) => Some(row),
            Slot::Inert(_) => None,
        }
    }

    pub(crate) fn as_row_mut(&mut self) -> Option<&mut Row> {
        match self {
            Slot::Row(row) => Some(row),
            Slot::Inert(_) => None,
        }
    }

    pub(crate) fn to_node(&self) -> Node {
        match self {
            Slot::Row(row) => row.element.clone().into(),
            Slot::Inert(node) => node.clone(),
        }
    }
}
