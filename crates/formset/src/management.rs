//! The management form: hidden counter inputs shared with the server.
//!
//! Django renders three hidden inputs per formset, `<prefix>-TOTAL_FORMS`,
//! `<prefix>-MAX_NUM_FORMS` and `<prefix>-MIN_NUM_FORMS`, with ids prefixed
//! by `id_`. Older Django versions omit the bounds; missing or empty bounds
//! mean "unbounded".

use ecow::{EcoString, eco_format};
use formset_dom::{HtmlElement, Node};
use serde::Serialize;

/// Field name of the total counter.
pub const TOTAL_FORMS: &str = "TOTAL_FORMS";
/// Field name of the maximum counter.
pub const MAX_NUM_FORMS: &str = "MAX_NUM_FORMS";
/// Field name of the minimum counter.
pub const MIN_NUM_FORMS: &str = "MIN_NUM_FORMS";

/// The three counters of a formset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementForm {
    /// The collection name.
    pub prefix: EcoString,
    /// Number of rows the server should process.
    pub total: usize,
    /// Upper bound on live rows.
    pub max: Option<usize>,
    /// Lower bound on live rows.
    pub min: Option<usize>,
}

impl ManagementForm {
    /// Unbounded counters starting at zero.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            total: 0,
            max: None,
            min: None,
        }
    }

    /// Sets the total.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// Sets the maximum.
    pub fn with_max(mut self, max: Option<usize>) -> Self {
        self.max = max;
        self
    }

    /// Sets the minimum.
    pub fn with_min(mut self, min: Option<usize>) -> Self {
        self.min = min;
        self
    }

    /// The `name` of a counter input.
    pub fn field_name(&self, field: &str) -> EcoString {
        eco_format!("{}-{field}", self.prefix)
    }

    /// The `id` of a counter input.
    pub fn field_id(&self, field: &str) -> EcoString {
        eco_format!("id_{}-{field}", self.prefix)
    }

    /// Reads the counters from the hidden inputs found in `tree`.
    ///
    /// A missing total reads as zero. Unparsable values are logged and
    /// treated as absent.
    pub fn from_node(tree: &Node, prefix: &str) -> Self {
        let mut form = Self::new(prefix);
        form.total = form.read(tree, TOTAL_FORMS).unwrap_or(0);
        form.max = form.read(tree, MAX_NUM_FORMS);
        form.min = form.read(tree, MIN_NUM_FORMS);
        form
    }

    fn read(&self, tree: &Node, field: &str) -> Option<usize> {
        let id = self.field_id(field);
        let input = tree.find(&|el| el.is("input") && el.attr("id") == Some(id.as_str()))?;
        let raw = input.attr("value").unwrap_or_default().trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring management form field {id}={raw:?}: {err}");
                None
            }
        }
    }

    /// Writes the total back into the `TOTAL_FORMS` input of `tree`.
    ///
    /// Returns whether the input was found.
    pub fn write_to(&self, tree: &mut Node) -> bool {
        let id = self.field_id(TOTAL_FORMS);
        match tree.find_mut(&|el| el.is("input") && el.attr("id") == Some(id.as_str())) {
            Some(input) => {
                input.set_attr("value", eco_format!("{}", self.total));
                true
            }
            None => {
                log::warn!("management form field {id} not found");
                false
            }
        }
    }

    /// Renders the three hidden inputs; absent bounds render empty.
    pub fn to_node(&self) -> Node {
        let count = |value: Option<usize>| value.map(|v| eco_format!("{v}")).unwrap_or_default();
        Node::Fragment(vec![
            self.hidden_input(TOTAL_FORMS, &eco_format!("{}", self.total)),
            self.hidden_input(MAX_NUM_FORMS, &count(self.max)),
            self.hidden_input(MIN_NUM_FORMS, &count(self.min)),
        ])
    }

    fn hidden_input(&self, field: &str, value: &str) -> Node {
        HtmlElement::new("input")
            .with_attribute("type", "hidden")
            .with_attribute("name", &self.field_name(field))
            .with_attribute("value", value)
            .with_attribute("id", &self.field_id(field))
            .self_closing(true)
            .into()
    }
}
