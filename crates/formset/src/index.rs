//! The identifying-attribute pattern.
//!
//! Fields of a row carry `<prefix>-<index>-<field>` somewhere in their
//! `for`, `id` or `name`, where `<index>` is a non-negative integer or the
//! [`PLACEHOLDER`] of a template. Renumbering rewrites the first occurrence
//! in each attribute and leaves the rest of the value alone.

use std::fmt;

use ecow::{EcoString, eco_format};
use formset_dom::HtmlElement;
use regex::{NoExpand, Regex};

use crate::error::{FormsetError, FormsetResult};

/// Stand-in index of a template's fields.
pub const PLACEHOLDER: &str = "__prefix__";

/// Attributes that identify a field.
const IDENTIFYING_ATTRS: &[&str] = &["for", "id", "name"];

/// Descendants of a row that are renumbered.
pub const ROW_CHILD_TAGS: &[&str] = &["input", "select", "textarea", "label", "div"];

/// The index segment of an identifying attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowIndex {
    /// The template sentinel.
    Placeholder,
    /// A position in the dense sequence.
    At(usize),
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::Placeholder => f.write_str(PLACEHOLDER),
            RowIndex::At(index) => write!(f, "{index}"),
        }
    }
}

/// Matcher and rewriter for `<prefix>-(<n>|__prefix__)-`.
#[derive(Debug, Clone)]
pub struct IndexPattern {
    prefix: EcoString,
    regex: Regex,
}

impl IndexPattern {
    /// Builds the pattern; the prefix is matched literally.
    pub fn new(prefix: &str) -> FormsetResult<Self> {
        let pattern = format!(r"{}-(\d+|{PLACEHOLDER})-", regex::escape(prefix));
        let regex = Regex::new(&pattern).map_err(|source| FormsetError::InvalidPrefix {
            prefix: prefix.into(),
            source,
        })?;
        Ok(Self {
            prefix: prefix.into(),
            regex,
        })
    }

    /// The prefix this pattern is built for.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The index embedded in `value`, if any.
    pub fn find(&self, value: &str) -> Option<RowIndex> {
        let segment = self.regex.captures(value)?.get(1)?.as_str();
        if segment == PLACEHOLDER {
            Some(RowIndex::Placeholder)
        } else {
            segment.parse().ok().map(RowIndex::At)
        }
    }

    /// `value` with its first index segment replaced, or `None` when it has
    /// no segment.
    pub fn renumber_value(&self, value: &str, index: RowIndex) -> Option<EcoString> {
        if !self.regex.is_match(value) {
            return None;
        }
        let replacement = eco_format!("{}-{index}-", self.prefix);
        Some(
            self.regex
                .replace(value, NoExpand(&replacement))
                .as_ref()
                .into(),
        )
    }

    /// Rewrites the identifying attributes of a single element. Returns
    /// whether anything changed.
    pub fn renumber_element(&self, element: &mut HtmlElement, index: RowIndex) -> bool {
        let mut changed = false;
        for name in IDENTIFYING_ATTRS {
            let renumbered = element
                .attr(name)
                .and_then(|value| self.renumber_value(value, index));
            if let Some(value) = renumbered {
                changed |= element.attr(name) != Some(value.as_str());
                element.set_attr(name, value);
            }
        }
        changed
    }

    /// Rewrites every field descendant of `row`.
    pub fn renumber_row(&self, row: &mut HtmlElement, index: RowIndex) {
        row.for_each_descendant_mut(&mut |el| {
            if el.tag_matches_any(ROW_CHILD_TAGS) {
                self.renumber_element(el, index);
            }
        });
    }

    /// The index carried by the first identifying field of `row`.
    pub fn index_of(&self, row: &HtmlElement) -> Option<RowIndex> {
        let field = row.find_descendant(&|el| {
            el.tag_matches_any(ROW_CHILD_TAGS) && self.element_index(el).is_some()
        })?;
        self.element_index(field)
    }

    fn element_index(&self, element: &HtmlElement) -> Option<RowIndex> {
        IDENTIFYING_ATTRS
            .iter()
            .find_map(|name| element.attr(name).and_then(|value| self.find(value)))
    }
}
