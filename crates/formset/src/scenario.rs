//! Replayable scenarios: a formset setup plus a list of actions.
//!
//! ```json
//! {
//!   "options": { "prefix": "item" },
//!   "management": { "max": 3, "min": 1 },
//!   "rows": [{ "element": { "tag": "div", "children": [] } }],
//!   "actions": ["add", { "delete": 0 }]
//! }
//! ```

use formset_dom::Node;
use serde::Deserialize;

use crate::error::FormsetResult;
use crate::formset::{Formset, Propagation};
use crate::management::ManagementForm;
use crate::options::FormsetOptions;

/// Counters given by a scenario; an absent total is taken from the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Counters {
    /// Declared `TOTAL_FORMS`.
    pub total: Option<usize>,
    /// `MAX_NUM_FORMS`.
    pub max: Option<usize>,
    /// `MIN_NUM_FORMS`.
    pub min: Option<usize>,
}

/// One step of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Activate the add affordance.
    Add,
    /// Activate the delete affordance of the active row at this position.
    Delete(usize),
}

/// A formset setup and the actions to replay on it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    /// Formset options.
    pub options: FormsetOptions,
    /// Counters.
    pub management: Counters,
    /// Candidate rows.
    pub rows: Vec<Node>,
    /// Explicit template, or a tree searched with `formTemplate`.
    pub template: Option<Node>,
    /// Actions, in order.
    pub actions: Vec<Action>,
}

impl Scenario {
    /// Parses a scenario from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builds the formset without replaying actions.
    pub fn build(&self) -> FormsetResult<Formset> {
        let mut builder = Formset::builder(self.options.clone())
            .rows(self.rows.iter().cloned())
            .bounds(self.management.max, self.management.min);
        if let Some(total) = self.management.total {
            builder = builder.management(
                ManagementForm::new(&self.options.prefix)
                    .with_total(total)
                    .with_max(self.management.max)
                    .with_min(self.management.min),
            );
        }
        if let Some(template) = &self.template {
            builder = builder.template_source(template.clone());
        }
        builder.build()
    }

    /// Builds the formset and replays every action.
    pub fn run(&self) -> FormsetResult<Formset> {
        let mut formset = self.build()?;
        for action in &self.actions {
            let propagation = match action {
                Action::Add => formset.dispatch(crate::FormsetEvent::Add),
                Action::Delete(position) => formset.delete_at(*position),
            };
            if propagation == Propagation::Continue {
                log::warn!("action {action:?} was not handled");
            }
        }
        Ok(formset)
    }
}
