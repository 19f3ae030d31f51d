//! Add and delete transitions, counters and the visibility policy.

use std::cell::RefCell;
use std::rc::Rc;

use formset::{
    Formset, FormsetError, FormsetEvent, FormsetOptions, HookEvent, ManagementForm, Propagation,
    RecordingHooks, RowState, TEMPLATE_CLASS, TotalForms,
};
use formset_dom::{HtmlElement, Node};

fn text_field(prefix: &str, index: &str, value: &str) -> HtmlElement {
    HtmlElement::new("input")
        .with_attribute("type", "text")
        .with_attribute("name", &format!("{prefix}-{index}-title"))
        .with_attribute("id", &format!("id_{prefix}-{index}-title"))
        .with_attribute("value", value)
}

fn delete_checkbox(prefix: &str, index: &str) -> HtmlElement {
    HtmlElement::new("input")
        .with_attribute("type", "checkbox")
        .with_attribute("name", &format!("{prefix}-{index}-DELETE"))
        .with_attribute("id", &format!("id_{prefix}-{index}-DELETE"))
}

fn delete_control(prefix: &str, index: &str) -> HtmlElement {
    HtmlElement::new("input")
        .with_attribute("type", "hidden")
        .with_attribute("name", &format!("{prefix}-{index}-DELETE"))
        .with_attribute("id", &format!("id_{prefix}-{index}-DELETE"))
}

/// A persisted row: a text field and a delete checkbox.
fn persisted_row(prefix: &str, index: usize, value: &str) -> Node {
    let index = index.to_string();
    HtmlElement::new("div")
        .with_child(text_field(prefix, &index, value))
        .with_child(delete_checkbox(prefix, &index))
        .into()
}

/// A row without a delete control; it is removed on delete.
fn plain_row(prefix: &str, index: usize, value: &str) -> Node {
    HtmlElement::new("div")
        .with_child(text_field(prefix, &index.to_string(), value))
        .into()
}

fn field_names(formset: &Formset) -> Vec<String> {
    formset
        .active_rows()
        .filter_map(|row| row.element().find_descendant(&|el| el.is_input_of_type("text")))
        .filter_map(|el| el.attr("name"))
        .map(str::to_owned)
        .collect()
}

fn field_values(formset: &Formset) -> Vec<String> {
    formset
        .active_rows()
        .filter_map(|row| row.element().find_descendant(&|el| el.is_input_of_type("text")))
        .filter_map(|el| el.value())
        .map(|value| value.to_string())
        .collect()
}

fn delete_anchors_visible(formset: &Formset) -> Vec<bool> {
    formset
        .active_rows()
        .filter_map(|row| {
            row.element()
                .find_descendant(&|el| el.is("a") && el.has_class("delete-row"))
        })
        .map(|anchor| !anchor.is_hidden())
        .collect()
}

#[test]
fn adds_keep_indices_dense() {
    let template = HtmlElement::new("div").with_child(text_field("form", "__prefix__", ""));
    let mut formset = Formset::builder(FormsetOptions::default())
        .template(template)
        .build()
        .unwrap();

    for _ in 0..4 {
        formset.add().unwrap();
    }

    assert_eq!(formset.total(), 4);
    assert_eq!(
        formset.active_rows().map(|row| row.index()).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(
        field_names(&formset),
        vec!["form-0-title", "form-1-title", "form-2-title", "form-3-title"]
    );
}

#[test]
fn hard_delete_renumbers_survivors() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(3),
        (0..3).map(|i| plain_row("item", i, ["a", "b", "c"][i])),
    )
    .unwrap();

    assert_eq!(formset.delete_at(1), Propagation::Stop);

    assert_eq!(formset.total(), 2);
    assert_eq!(formset.rows().count(), 2);
    assert_eq!(field_names(&formset), vec!["item-0-title", "item-1-title"]);
    assert_eq!(field_values(&formset), vec!["a", "c"]);
    let label_ids = formset
        .rows()
        .filter_map(|row| row.element().find_descendant(&|el| el.is("input")))
        .filter_map(|el| el.attr("id"))
        .collect::<Vec<_>>();
    assert_eq!(label_ids, vec!["id_item-0-title", "id_item-1-title"]);
}

#[test]
fn soft_delete_hides_without_renumbering() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(3),
        (0..3).map(|i| persisted_row("item", i, "v")),
    )
    .unwrap();
    let before = field_names(&formset);
    let target = formset.active_rows().nth(1).unwrap().id();

    assert_eq!(formset.delete(target), Propagation::Stop);

    assert_eq!(formset.total(), 2);
    assert_eq!(formset.rows().count(), 3);
    let row = formset.row(target).unwrap();
    assert_eq!(row.state(), RowState::SoftDeleted);
    assert!(!row.is_visible());
    let control = row
        .element()
        .find_descendant(&|el| el.is_input_of_type("hidden"))
        .unwrap();
    assert_eq!(control.value().as_deref(), Some("on"));

    let mut after = field_names(&formset);
    after.insert(1, before[1].clone());
    assert_eq!(after, before);
}

#[test]
fn deleting_a_deleted_row_is_a_noop() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(2),
        (0..2).map(|i| persisted_row("item", i, "v")),
    )
    .unwrap();
    let target = formset.active_rows().next().unwrap().id();

    assert_eq!(formset.delete(target), Propagation::Stop);
    assert_eq!(formset.total(), 1);
    assert_eq!(formset.delete(target), Propagation::Stop);
    assert_eq!(formset.total(), 1);
}

#[test]
fn min_max_scenario() {
    let template = HtmlElement::new("div")
        .with_child(text_field("item", "__prefix__", ""))
        .with_child(delete_control("item", "__prefix__"));
    let mut formset = Formset::builder(FormsetOptions::new("item"))
        .management(
            ManagementForm::new("item")
                .with_total(1)
                .with_max(Some(3))
                .with_min(Some(1)),
        )
        .row(persisted_row("item", 0, "first"))
        .template(template)
        .build()
        .unwrap();

    assert_eq!(formset.total(), 1);
    assert!(formset.can_add());
    assert!(!formset.can_delete());
    assert_eq!(delete_anchors_visible(&formset), vec![false]);

    formset.add().unwrap();
    assert_eq!(delete_anchors_visible(&formset), vec![true, true]);
    formset.add().unwrap();
    assert_eq!(formset.total(), 3);
    assert!(!formset.can_add());
    assert!(formset.can_delete());

    assert_eq!(formset.delete_at(0), Propagation::Stop);
    assert_eq!(formset.total(), 2);
    assert!(formset.can_add());
    assert!(formset.can_delete());
    assert_eq!(delete_anchors_visible(&formset), vec![true, true]);

    assert_eq!(formset.delete_at(0), Propagation::Stop);
    assert_eq!(formset.total(), 1);
    assert!(formset.can_add());
    assert!(!formset.can_delete());
    assert_eq!(delete_anchors_visible(&formset), vec![false]);
}

#[test]
fn add_ignores_hidden_affordance() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(1).with_max(Some(1)),
        [plain_row("item", 0, "x")],
    )
    .unwrap();
    assert!(!formset.can_add());
    assert!(formset.add().is_some());
    assert_eq!(formset.total(), 2);
}

#[test]
fn derived_template_clears_values() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(1),
        [persisted_row("item", 0, "x")],
    )
    .unwrap();

    let id = formset.add().unwrap();

    let row = formset.row(id).unwrap();
    assert_eq!(row.index(), 1);
    let field = row
        .element()
        .find_descendant(&|el| el.is_input_of_type("text"))
        .unwrap();
    assert_eq!(field.attr("name"), Some("item-1-title"));
    assert_eq!(field.value().as_deref(), Some(""));
    assert!(
        !row.element()
            .has_descendant(&|el| el.attr("id").is_some_and(|id| id.ends_with("-DELETE")))
    );
    assert_eq!(field_values(&formset), vec!["x", ""]);
}

#[test]
fn keep_field_values_survive_derivation() {
    let options = FormsetOptions {
        keep_field_values: "[name$=-title]".into(),
        ..FormsetOptions::new("item")
    };
    let mut formset = Formset::new(
        options,
        ManagementForm::new("item").with_total(1),
        [plain_row("item", 0, "kept")],
    )
    .unwrap();
    formset.add().unwrap();
    assert_eq!(field_values(&formset), vec!["kept", "kept"]);
}

#[test]
fn without_rows_or_template_add_is_a_noop() {
    let mut formset = Formset::builder(FormsetOptions::default()).build().unwrap();
    assert!(formset.template().is_none());
    assert_eq!(formset.add(), None);
    assert_eq!(formset.total(), 0);
    assert_eq!(formset.to_node(), Node::Fragment(vec![]));
}

#[test]
fn hooks_see_added_and_removed_rows() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut formset = Formset::builder(FormsetOptions::new("item"))
        .rows([plain_row("item", 0, "a")])
        .hooks(RecordingHooks::new(events.clone()))
        .build()
        .unwrap();

    let added = formset.add().unwrap();
    let first = formset.active_rows().next().unwrap().id();
    assert_eq!(formset.dispatch(FormsetEvent::Delete(first)), Propagation::Stop);

    assert_eq!(
        *events.borrow(),
        vec![HookEvent::Added(added), HookEvent::Removed(first)]
    );
}

#[test]
fn events_report_propagation() {
    let mut formset = Formset::builder(FormsetOptions::new("item"))
        .rows([plain_row("item", 0, "a")])
        .build()
        .unwrap();

    assert_eq!(formset.dispatch(FormsetEvent::Add), Propagation::Stop);
    let gone = formset.active_rows().next().unwrap().id();
    assert_eq!(formset.dispatch(FormsetEvent::Delete(gone)), Propagation::Stop);
    assert_eq!(
        formset.dispatch(FormsetEvent::Delete(gone)),
        Propagation::Continue
    );
    assert_eq!(formset.delete_at(5), Propagation::Continue);
    assert_eq!(formset.total(), 1);
}

#[test]
fn include_deleted_mode_counts_soft_deleted_rows() {
    let options = FormsetOptions {
        total_forms: TotalForms::IncludeDeleted,
        ..FormsetOptions::new("item")
    };
    let mut formset = Formset::new(
        options,
        ManagementForm::new("item").with_total(2).with_max(Some(3)),
        (0..2).map(|i| persisted_row("item", i, "v")),
    )
    .unwrap();
    let added = formset.add().unwrap();
    assert_eq!(formset.total(), 3);
    assert!(!formset.can_add());

    assert_eq!(formset.delete_at(0), Propagation::Stop);
    assert_eq!(formset.total(), 3);
    assert_eq!(formset.deleted_count(), 1);
    assert!(formset.can_add());

    assert_eq!(formset.delete(added), Propagation::Stop);
    assert_eq!(formset.total(), 2);
    assert_eq!(formset.deleted_count(), 1);
    assert_eq!(
        formset.rows().map(|row| row.index()).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[test]
fn initial_checked_checkbox_starts_deleted() {
    let mut checked = delete_checkbox("item", "1");
    checked.set_attr("checked", "checked");
    let deleted = HtmlElement::new("div")
        .with_child(text_field("item", "1", "gone"))
        .with_child(checked);
    let formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(1),
        [persisted_row("item", 0, "kept"), deleted.into()],
    )
    .unwrap();

    assert_eq!(formset.total(), 1);
    let states = formset.rows().map(|row| row.state()).collect::<Vec<_>>();
    assert_eq!(states, vec![RowState::Active, RowState::SoftDeleted]);
    assert_eq!(formset.rows().nth(1).unwrap().index(), 1);
}

#[test]
fn explicit_template_from_candidates() {
    let options = FormsetOptions {
        form_template: Some(".empty-form".into()),
        ..FormsetOptions::new("item")
    };
    let template = HtmlElement::new("div")
        .with_attribute("class", "empty-form")
        .with_attribute("id", "item-empty")
        .with_child(text_field("item", "__prefix__", "default"));
    let mut formset = Formset::builder(options)
        .rows([plain_row("item", 0, "a"), template.into()])
        .build()
        .unwrap();

    assert_eq!(formset.rows().count(), 1);
    let template = formset.template().unwrap();
    assert!(template.is_explicit());
    assert!(template.element().has_class(TEMPLATE_CLASS));

    let id = formset.add().unwrap();
    let row = formset.row(id).unwrap();
    assert!(!row.element().has_class(TEMPLATE_CLASS));
    assert!(row.element().has_class("empty-form"));
    assert_eq!(field_values(&formset), vec!["a", "default"]);
    assert_eq!(field_names(&formset)[1], "item-1-title");
}

#[test]
fn missing_explicit_template_is_an_error() {
    let options = FormsetOptions {
        form_template: Some("#nowhere".into()),
        ..FormsetOptions::default()
    };
    let err = Formset::builder(options)
        .rows([plain_row("form", 0, "a")])
        .build()
        .unwrap_err();
    assert!(matches!(err, FormsetError::TemplateNotFound(selector) if selector.as_str() == "#nowhere"));
}

#[test]
fn rows_and_counters_from_a_document() {
    let document = Node::Fragment(vec![
        HtmlElement::new("input")
            .with_attribute("type", "hidden")
            .with_attribute("id", "id_item-TOTAL_FORMS")
            .with_attribute("value", "2")
            .into(),
        HtmlElement::new("input")
            .with_attribute("type", "hidden")
            .with_attribute("id", "id_item-MAX_NUM_FORMS")
            .with_attribute("value", "2")
            .into(),
        HtmlElement::new("table")
            .with_child(
                HtmlElement::new("tbody")
                    .with_child(
                        HtmlElement::new("tr")
                            .with_attribute("class", "item-row")
                            .with_child(HtmlElement::new("td").with_child(text_field("item", "0", "a"))),
                    )
                    .with_child(
                        HtmlElement::new("tr")
                            .with_attribute("class", "item-row")
                            .with_child(HtmlElement::new("td").with_child(text_field("item", "1", "b"))),
                    ),
            )
            .into(),
    ]);

    let formset = Formset::builder(FormsetOptions::new("item"))
        .select_rows(&document, "tr.item-row")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(formset.total(), 2);
    assert_eq!(formset.management_form().max, Some(2));
    assert!(!formset.can_add());
    let template = formset.template().unwrap();
    assert!(!template.is_explicit());
    let field = template
        .element()
        .find_descendant(&|el| el.is_input_of_type("text"))
        .unwrap();
    assert_eq!(field.attr("name"), Some("item-__prefix__-title"));
    assert_eq!(field.value().as_deref(), Some(""));
}

#[test]
fn default_options_take_the_marked_template_out_of_the_rows() {
    let mut template = HtmlElement::new("div")
        .with_attribute("class", TEMPLATE_CLASS)
        .with_child(text_field("form", "__prefix__", ""));
    template.hide();
    let mut formset = Formset::builder(FormsetOptions::default())
        .management(ManagementForm::new("form").with_total(1))
        .rows([plain_row("form", 0, "a"), template.into()])
        .build()
        .unwrap();

    assert_eq!(formset.total(), 1);
    assert_eq!(formset.rows().count(), 1);
    assert!(formset.template().unwrap().is_explicit());

    formset.add().unwrap();
    assert_eq!(formset.total(), 2);
    assert_eq!(field_names(&formset), vec!["form-0-title", "form-1-title"]);
    assert_eq!(field_values(&formset), vec!["a", ""]);
}

#[test]
fn default_template_selector_falls_back_to_derivation() {
    let formset = Formset::builder(FormsetOptions::default())
        .rows([plain_row("form", 0, "a")])
        .build()
        .unwrap();
    assert!(!formset.template().unwrap().is_explicit());
}

#[test]
fn rows_hidden_at_setup_are_not_counted() {
    let mut hidden = HtmlElement::new("div").with_child(text_field("item", "1", "b"));
    hidden.hide();
    let mut formset = Formset::builder(FormsetOptions::new("item"))
        .rows([plain_row("item", 0, "a"), hidden.into()])
        .build()
        .unwrap();

    assert_eq!(formset.total(), 1);
    assert_eq!(formset.rows().count(), 1);
    assert_eq!(formset.slots().len(), 2);

    formset.add().unwrap();
    assert_eq!(field_names(&formset), vec!["item-0-title", "item-1-title"]);
    assert_eq!(field_values(&formset), vec!["a", ""]);
}

#[test]
fn active_mode_add_after_soft_delete_takes_the_total_as_index() {
    let mut formset = Formset::new(
        FormsetOptions::new("item"),
        ManagementForm::new("item").with_total(3),
        (0..3).map(|i| persisted_row("item", i, "v")),
    )
    .unwrap();

    assert_eq!(formset.delete_at(0), Propagation::Stop);
    assert_eq!(formset.total(), 2);
    let id = formset.add().unwrap();

    assert_eq!(formset.row(id).unwrap().index(), 2);
    assert_eq!(
        field_names(&formset),
        vec!["item-1-title", "item-2-title", "item-2-title"]
    );
}
