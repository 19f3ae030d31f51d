//! Formset configuration.
//!
//! [`FormsetOptions`] is the serializable surface, with the same keys and
//! defaults as the jQuery formset plugin. It is resolved once into a
//! [`FormsetConfig`], whose class lists and selectors are typed.

use ecow::EcoString;
use formset_dom::{HtmlElement, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{FormsetError, FormsetResult};

/// Class marking an explicit template; stripped from rows stamped out of it.
pub const TEMPLATE_CLASS: &str = "formset-custom-template";

/// Default `formTemplate`: a template node marked server-side. When it
/// matches nothing the template is derived from the last row.
pub const DEFAULT_FORM_TEMPLATE: &str = ".formset-custom-template";

/// How `TOTAL_FORMS` counts rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalForms {
    /// Only active rows are counted; soft-deleted rows drop out of the total.
    #[default]
    Active,
    /// Soft-deleted rows stay in the total so the server can process their
    /// deletion. Hard deletes renumber every remaining row.
    IncludeDeleted,
}

/// User-facing formset options.
///
/// # Example
///
/// ```rust
/// use formset::{FormsetOptions, TotalForms};
///
/// let options: FormsetOptions =
///     serde_json::from_str(r#"{ "prefix": "item", "extraClasses": ["row1", "row2"] }"#).unwrap();
/// assert_eq!(options.prefix, "item");
/// assert_eq!(options.add_text, "add another");
/// assert_eq!(options.total_forms, TotalForms::Active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormsetOptions {
    /// The collection name scoping counters and field names.
    pub prefix: EcoString,
    /// Selector resolving an explicit template element.
    pub form_template: Option<EcoString>,
    /// Text of the add affordance.
    pub add_text: EcoString,
    /// Text of the delete affordances.
    pub delete_text: EcoString,
    /// Whitespace-separated classes of the add affordance.
    pub add_css_class: EcoString,
    /// Whitespace-separated classes of the delete affordances.
    pub delete_css_class: EcoString,
    /// Class marking every managed row.
    pub form_css_class: EcoString,
    /// Classes applied to rows in turn, by index.
    pub extra_classes: Vec<EcoString>,
    /// Selector of fields whose values survive template derivation.
    pub keep_field_values: EcoString,
    /// Counting mode of `TOTAL_FORMS`.
    pub total_forms: TotalForms,
}

impl Default for FormsetOptions {
    fn default() -> Self {
        Self {
            prefix: "form".into(),
            form_template: Some(DEFAULT_FORM_TEMPLATE.into()),
            add_text: "add another".into(),
            delete_text: "remove".into(),
            add_css_class: "add-row".into(),
            delete_css_class: "delete-row".into(),
            form_css_class: "dynamic-form".into(),
            extra_classes: Vec::new(),
            keep_field_values: EcoString::new(),
            total_forms: TotalForms::default(),
        }
    }
}

impl FormsetOptions {
    /// Creates options with the given prefix and defaults otherwise.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Resolves class lists and selectors.
    pub fn resolve(&self) -> FormsetResult<FormsetConfig> {
        let form_template = self
            .form_template
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_selector("formTemplate", s))
            .transpose()?;

        Ok(FormsetConfig {
            prefix: self.prefix.clone(),
            form_template,
            add_text: self.add_text.clone(),
            delete_text: self.delete_text.clone(),
            add_class: ClassList::parse(&self.add_css_class),
            delete_class: ClassList::parse(&self.delete_css_class),
            form_class: ClassList::parse(&self.form_css_class),
            add_row_class: ClassList::parse(&format!("{}-add", self.form_css_class.trim())),
            extra_classes: self
                .extra_classes
                .iter()
                .map(|class| ClassList::parse(class))
                .collect(),
            keep_field_values: parse_selector("keepFieldValues", &self.keep_field_values)?,
            total_forms: self.total_forms,
        })
    }
}

fn parse_selector(option: &'static str, source: &str) -> FormsetResult<Selector> {
    Selector::parse(source).map_err(|source| FormsetError::InvalidSelector { option, source })
}

/// A whitespace-separated list of classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<EcoString>);

impl ClassList {
    /// Splits a class attribute value.
    pub fn parse(classes: &str) -> Self {
        Self(classes.split_ascii_whitespace().map(EcoString::from).collect())
    }

    /// Whether the list has no classes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the classes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(EcoString::as_str)
    }

    /// The list as a `class` attribute value.
    pub fn to_attr(&self) -> EcoString {
        let mut attr = EcoString::new();
        for (i, class) in self.iter().enumerate() {
            if i > 0 {
                attr.push(' ');
            }
            attr.push_str(class);
        }
        attr
    }

    /// Adds every class to `element`.
    pub fn apply(&self, element: &mut HtmlElement) {
        for class in self.iter() {
            element.add_class(class);
        }
    }

    /// Removes every class from `element`.
    pub fn strip(&self, element: &mut HtmlElement) {
        for class in self.iter() {
            element.remove_class(class);
        }
    }

    /// Whether `element` carries all classes of a non-empty list.
    pub fn matches(&self, element: &HtmlElement) -> bool {
        !self.is_empty() && self.iter().all(|class| element.has_class(class))
    }
}

/// Resolved formset configuration.
#[derive(Debug, Clone)]
pub struct FormsetConfig {
    /// The collection name.
    pub prefix: EcoString,
    /// Selector of the explicit template, if any.
    pub form_template: Option<Selector>,
    /// Text of the add affordance.
    pub add_text: EcoString,
    /// Text of the delete affordances.
    pub delete_text: EcoString,
    /// Classes of the add anchor.
    pub add_class: ClassList,
    /// Classes of the delete anchors.
    pub delete_class: ClassList,
    /// Managed-row marker.
    pub form_class: ClassList,
    /// Classes of the table row wrapping the add anchor.
    pub add_row_class: ClassList,
    /// Alternating row classes.
    pub extra_classes: Vec<ClassList>,
    /// Fields preserved during template derivation.
    pub keep_field_values: Selector,
    /// Counting mode.
    pub total_forms: TotalForms,
}

impl FormsetConfig {
    /// Replaces any alternating class on `row` with the one for `ordinal`.
    pub fn apply_extra_classes(&self, row: &mut HtmlElement, ordinal: usize) {
        if self.extra_classes.is_empty() {
            return;
        }
        for classes in &self.extra_classes {
            classes.strip(row);
        }
        self.extra_classes[ordinal % self.extra_classes.len()].apply(row);
    }
}
