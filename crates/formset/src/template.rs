//! The stamp new rows are cloned from.

use formset_dom::HtmlElement;

use crate::affordance::remove_delete_affordance;
use crate::classify::is_soft_delete_control;
use crate::index::{IndexPattern, ROW_CHILD_TAGS, RowIndex};
use crate::options::{FormsetConfig, TEMPLATE_CLASS};

/// A row whose fields carry the placeholder index.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    element: HtmlElement,
    explicit: bool,
}

impl Template {
    /// Prepares a user-supplied template: drops its `id`, tags it as a
    /// managed row and as a template, renumbers its fields to the
    /// placeholder and hides it.
    pub fn explicit(mut element: HtmlElement, config: &FormsetConfig, pattern: &IndexPattern) -> Self {
        element.remove_attr("id");
        config.form_class.apply(&mut element);
        element.add_class(TEMPLATE_CLASS);
        pattern.renumber_row(&mut element, RowIndex::Placeholder);
        element.hide();
        Self {
            element,
            explicit: true,
        }
    }

    /// Derives a template from the last real row: drops its `id`, its
    /// soft-delete control and delete anchor, resets every field not
    /// matched by `keepFieldValues`, and renumbers to the placeholder.
    pub fn derive(last_row: &HtmlElement, config: &FormsetConfig, pattern: &IndexPattern) -> Self {
        let mut element = last_row.clone();
        element.remove_attr("id");
        element.remove_descendants(&is_soft_delete_control);
        remove_delete_affordance(config, &mut element);
        element.for_each_descendant_mut(&mut |el| {
            if el.tag_matches_any(ROW_CHILD_TAGS) && !config.keep_field_values.matches(el) {
                el.clear_value();
            }
        });
        pattern.renumber_row(&mut element, RowIndex::Placeholder);
        Self {
            element,
            explicit: false,
        }
    }

    /// The template markup.
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Whether the template was supplied rather than derived. Only explicit
    /// templates are rendered.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// A visible copy without the template marker, ready to be numbered.
    pub fn stamp(&self) -> HtmlElement {
        let mut row = self.element.clone();
        row.remove_class(TEMPLATE_CLASS);
        row.show();
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormsetOptions;
    use crate::affordance::{has_delete_affordance, insert_delete_affordance};

    fn setup(keep: &str) -> (FormsetConfig, IndexPattern) {
        let options = FormsetOptions {
            keep_field_values: keep.into(),
            ..FormsetOptions::new("item")
        };
        (
            options.resolve().unwrap(),
            IndexPattern::new("item").unwrap(),
        )
    }

    fn last_row(config: &FormsetConfig) -> HtmlElement {
        let mut row = HtmlElement::new("div")
            .with_attribute("id", "row-1")
            .with_attribute("class", "dynamic-form")
            .with_child(
                HtmlElement::new("input")
                    .with_attribute("name", "item-1-title")
                    .with_attribute("value", "x"),
            )
            .with_child(
                HtmlElement::new("input")
                    .with_attribute("class", "keep")
                    .with_attribute("name", "item-1-kind")
                    .with_attribute("value", "book"),
            )
            .with_child(
                HtmlElement::new("input")
                    .with_attribute("type", "checkbox")
                    .with_attribute("name", "item-1-flag")
                    .with_attribute("checked", "checked"),
            )
            .with_child(
                HtmlElement::new("input")
                    .with_attribute("type", "hidden")
                    .with_attribute("id", "id_item-1-DELETE")
                    .with_attribute("value", "on"),
            );
        insert_delete_affordance(config, &mut row);
        row
    }

    #[test]
    fn derived_template_is_clean() {
        let (config, pattern) = setup(".keep");
        let template = Template::derive(&last_row(&config), &config, &pattern);
        let el = template.element();

        assert!(!template.is_explicit());
        assert!(!el.has_attr("id"));
        assert!(!has_delete_affordance(&config, el));
        assert!(!el.has_descendant(&is_soft_delete_control));

        let fields = el.child_elements().collect::<Vec<_>>();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].attr("name"), Some("item-__prefix__-title"));
        assert_eq!(fields[0].attr("value"), Some(""));
        assert_eq!(fields[1].attr("value"), Some("book"));
        assert!(!fields[2].is_checked());
    }

    #[test]
    fn explicit_template_is_tagged_and_hidden() {
        let (config, pattern) = setup("");
        let supplied = HtmlElement::new("tr")
            .with_attribute("id", "empty-form")
            .with_child(
                HtmlElement::new("td").with_child(
                    HtmlElement::new("input").with_attribute("name", "item-0-title"),
                ),
            );
        let template = Template::explicit(supplied, &config, &pattern);
        let el = template.element();

        assert!(template.is_explicit());
        assert!(el.is_hidden());
        assert!(el.has_class("dynamic-form") && el.has_class(TEMPLATE_CLASS));
        assert!(!el.has_attr("id"));
        assert_eq!(pattern.index_of(el), Some(RowIndex::Placeholder));

        let stamped = template.stamp();
        assert!(!stamped.is_hidden());
        assert!(!stamped.has_class(TEMPLATE_CLASS));
        assert!(stamped.has_class("dynamic-form"));
    }
}
