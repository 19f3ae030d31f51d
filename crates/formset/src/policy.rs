//! Min/max visibility policy of the affordances.

use serde::Serialize;

/// Which affordances may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    /// The add affordance is shown.
    pub can_add: bool,
    /// Delete affordances are shown.
    pub can_delete: bool,
}

impl Visibility {
    /// Evaluates the policy over `total - deleted` live rows.
    ///
    /// An absent bound never hides anything.
    pub fn evaluate(total: usize, deleted: usize, max: Option<usize>, min: Option<usize>) -> Self {
        let live = total.saturating_sub(deleted);
        Self {
            can_add: max.is_none_or(|max| max > live),
            can_delete: min.is_none_or(|min| live > min),
        }
    }
}
