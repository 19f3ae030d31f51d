use super::{HtmlElement, Node};

fn text_input(name: &str, value: &str) -> HtmlElement {
    HtmlElement::new("input")
        .with_attribute("type", "text")
        .with_attribute("name", name)
        .with_attribute("value", value)
        .self_closing(true)
}

fn select(name: &str, selected: &str) -> HtmlElement {
    let option = |value: &str| {
        let mut option = HtmlElement::new("option")
            .with_attribute("value", value)
            .with_child(Node::text(value));
        if value == selected {
            option.set_attr("selected", "selected");
        }
        Node::from(option)
    };
    HtmlElement::new("select")
        .with_attribute("name", name)
        .with_children(vec![option(""), option("a"), option("b")])
}

#[test]
fn attributes_are_case_insensitive_and_replaced_in_place() {
    let mut el = HtmlElement::new("input")
        .with_attribute("ID", "id_form-0-title")
        .with_attribute("name", "form-0-title");
    assert_eq!(el.attr("id"), Some("id_form-0-title"));

    el.set_attr("id", "id_form-1-title");
    assert_eq!(el.attributes[0].name, "ID");
    assert_eq!(el.attributes[0].value, "id_form-1-title");

    assert_eq!(el.remove_attr("Id").as_deref(), Some("id_form-1-title"));
    assert!(!el.has_attr("id"));
    assert_eq!(el.attributes.len(), 1);
}

#[test]
fn classes_are_added_once_and_removed_completely() {
    let mut el = HtmlElement::new("tr").with_attribute("class", "row1  extra ");
    el.add_class("dynamic-form");
    el.add_class("dynamic-form");
    assert_eq!(el.attr("class"), Some("row1  extra dynamic-form"));

    el.remove_class("row1");
    assert_eq!(el.attr("class"), Some("extra dynamic-form"));
    el.remove_class("extra");
    el.remove_class("dynamic-form");
    assert!(!el.has_attr("class"));
}

#[test]
fn hide_and_show_preserve_other_declarations() {
    let mut el = HtmlElement::new("div").with_attribute("style", "color: red;");
    assert!(!el.is_hidden());

    el.hide();
    el.hide();
    assert_eq!(el.attr("style"), Some("color: red; display: none"));
    assert!(el.is_hidden());

    el.show();
    assert_eq!(el.attr("style"), Some("color: red"));

    let mut bare = HtmlElement::new("div");
    bare.set_visible(false);
    assert_eq!(bare.attr("style"), Some("display: none"));
    bare.set_visible(true);
    assert!(!bare.has_attr("style"));
}

#[test]
fn subtree_queries_run_in_document_order() {
    let row: Node = HtmlElement::new("tr")
        .with_child(HtmlElement::new("td").with_child(text_input("form-0-a", "1")))
        .with_child(HtmlElement::new("td").with_child(text_input("form-0-b", "2")))
        .into();

    let names = row
        .find_all(&|el| el.is("input"))
        .into_iter()
        .filter_map(|el| el.attr("name"))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["form-0-a", "form-0-b"]);

    let first = row.find(&|el| el.is_form_control()).unwrap();
    assert_eq!(first.attr("name"), Some("form-0-a"));
    assert!(row.find(&|el| el.is("textarea")).is_none());
}

#[test]
fn find_mut_edits_the_first_match_in_place() {
    let mut row: Node = HtmlElement::new("tr")
        .with_child(HtmlElement::new("td").with_child(text_input("form-0-a", "1")))
        .with_child(HtmlElement::new("td").with_child(text_input("form-0-b", "2")))
        .into();

    let first = row.find_mut(&|el| el.is("input")).unwrap();
    first.set_attr("value", "x");
    let own = row.find_mut(&|el| el.is("tr")).unwrap();
    own.add_class("dynamic-form");
    assert!(row.find_mut(&|el| el.is("select")).is_none());

    let values = row
        .find_all(&|el| el.is("input"))
        .into_iter()
        .filter_map(|el| el.attr("value"))
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["x", "2"]);
    assert!(row.as_element().unwrap().has_class("dynamic-form"));
}

#[test]
fn remove_descendants_drops_whole_subtrees() {
    let mut row = HtmlElement::new("div")
        .with_child(HtmlElement::new("p").with_child(text_input("form-0-a", "")))
        .with_child(text_input("form-0-b", ""));
    let removed = row.remove_descendants(&|el| el.is("p"));
    assert_eq!(removed, 1);
    assert_eq!(row.child_elements().count(), 1);
    assert!(!row.has_descendant(&|el| el.attr("name") == Some("form-0-a")));
}

#[test]
fn input_values_live_in_the_value_attribute() {
    let mut input = text_input("form-0-title", "x");
    assert_eq!(input.value().as_deref(), Some("x"));
    input.clear_value();
    assert_eq!(input.attr("value"), Some(""));

    let untyped = HtmlElement::new("input");
    assert_eq!(untyped.input_type().as_deref(), Some("text"));
    assert!(HtmlElement::new("label").value().is_none());
}

#[test]
fn checkable_inputs_are_unchecked_on_clear() {
    let mut checkbox = HtmlElement::new("input")
        .with_attribute("type", "CHECKBOX")
        .with_attribute("value", "on")
        .with_attribute("checked", "");
    assert!(checkbox.is_checkable());
    assert!(checkbox.is_checked());

    checkbox.clear_value();
    assert!(!checkbox.is_checked());
    assert_eq!(checkbox.attr("value"), Some("on"));
}

#[test]
fn textarea_value_is_its_text() {
    let mut textarea = HtmlElement::new("textarea").with_child(Node::text("notes"));
    assert_eq!(textarea.value().as_deref(), Some("notes"));
    textarea.clear_value();
    assert!(textarea.children.is_empty());
    assert_eq!(textarea.value().as_deref(), Some(""));
}

#[test]
fn select_value_follows_selected_option() {
    let mut field = select("form-0-kind", "b");
    assert_eq!(field.value().as_deref(), Some("b"));

    field.set_value("a");
    assert_eq!(field.value().as_deref(), Some("a"));

    field.clear_value();
    assert_eq!(field.value().as_deref(), Some(""));
    let selected = Node::from(field)
        .find_all(&|el| el.has_attr("selected"))
        .len();
    assert_eq!(selected, 1);
}

#[test]
fn node_tree_deserializes_from_camel_case_json() {
    let json = r#"{
        "element": {
            "tag": "li",
            "attributes": [{ "name": "class", "value": "item" }],
            "children": [{ "text": "hi" }]
        }
    }"#;
    let node: Node = serde_json::from_str(json).unwrap();
    let el = node.as_element().unwrap();
    assert!(el.has_class("item"));
    assert!(!el.self_closing);
    assert_eq!(el.text_content(), "hi");
}
