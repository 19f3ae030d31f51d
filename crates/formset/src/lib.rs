//! Add/remove row management for server-indexed formsets.
//!
//! A formset is a run of structurally identical rows whose fields are named
//! `<prefix>-<index>-<field>`, plus hidden counters telling the server how
//! many rows to expect. [`Formset`] keeps the indices dense as rows are
//! added and deleted, stamps new rows out of a template, and shows or hides
//! the add and delete affordances according to the min/max bounds.
//!
//! Rows with a soft-delete control (Django's `-DELETE` field) are never
//! removed: they are marked and hidden so the server can delete the
//! underlying record.

// Formset related exports
pub use crate::formset::{
    Formset, FormsetBuilder, FormsetEvent, FormsetSummary, Propagation, RowSummary,
};
pub use crate::hooks::{FormsetHooks, HookEvent, NoopHooks, RecordingHooks};
pub use crate::index::{IndexPattern, PLACEHOLDER, RowIndex};
pub use crate::management::ManagementForm;
pub use crate::options::{
    ClassList, DEFAULT_FORM_TEMPLATE, FormsetConfig, FormsetOptions, TEMPLATE_CLASS, TotalForms,
};
pub use crate::policy::Visibility;
pub use crate::row::{Row, RowId, RowLayout, RowState, Slot};
pub use crate::scenario::{Action, Counters, Scenario};
pub use crate::template::Template;

// Error types
pub use crate::error::{FormsetError, FormsetResult};

pub mod affordance;
pub mod classify;
pub mod error;
pub mod formset;
pub mod hooks;
pub mod index;
pub mod management;
pub mod options;
pub mod policy;
pub mod row;
pub mod scenario;
pub mod template;
