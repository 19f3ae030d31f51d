//! The row collection and its transitions.

use std::fmt;

use ecow::EcoString;
use formset_dom::{HtmlElement, HtmlWriter, HtmlWriterOptions, Node, Selector};
use serde::Serialize;

use crate::affordance::{add_affordance, insert_delete_affordance, set_delete_visible};
use crate::classify::{
    Classified, DELETED_VALUE, classify, decorate, soft_delete_control, soft_delete_control_mut,
};
use crate::error::{FormsetError, FormsetResult};
use crate::hooks::{FormsetHooks, NoopHooks};
use crate::index::{IndexPattern, RowIndex};
use crate::management::ManagementForm;
use crate::options::{DEFAULT_FORM_TEMPLATE, FormsetConfig, FormsetOptions, TotalForms};
use crate::policy::Visibility;
use crate::row::{Row, RowId, RowLayout, RowState, Slot};
use crate::template::Template;

/// A user action on the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormsetEvent {
    /// The add affordance was activated.
    Add,
    /// The delete affordance of a row was activated.
    Delete(RowId),
}

/// Whether an event was consumed.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The event did not address this collection.
    Continue,
    /// The event ran a transition; the triggering control's default
    /// activation must be suppressed.
    Stop,
}

/// A dynamically resizable collection of form rows.
///
/// # Example
///
/// ```rust
/// use formset::{Formset, FormsetOptions, ManagementForm};
/// use formset_dom::{HtmlElement, Node};
///
/// let row = HtmlElement::new("div").with_child(
///     HtmlElement::new("input")
///         .with_attribute("name", "item-0-title")
///         .with_attribute("value", "x"),
/// );
/// let mut formset = Formset::builder(FormsetOptions::new("item"))
///     .management(ManagementForm::new("item").with_total(1).with_max(Some(2)))
///     .row(row)
///     .build()
///     .unwrap();
///
/// formset.add().unwrap();
/// assert_eq!(formset.total(), 2);
/// assert!(!formset.can_add());
/// ```
pub struct Formset {
    config: FormsetConfig,
    pattern: IndexPattern,
    management: ManagementForm,
    slots: Vec<Slot>,
    template: Option<Template>,
    layout: RowLayout,
    columns: usize,
    visibility: Visibility,
    next_id: u32,
    hooks: Box<dyn FormsetHooks>,
}

impl fmt::Debug for Formset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formset")
            .field("config", &self.config)
            .field("management", &self.management)
            .field("slots", &self.slots)
            .field("template", &self.template)
            .field("layout", &self.layout)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Builder of a [`Formset`].
pub struct FormsetBuilder {
    options: FormsetOptions,
    management: Option<ManagementForm>,
    declared_total: Option<usize>,
    candidates: Vec<Node>,
    template: Option<HtmlElement>,
    template_source: Option<Node>,
    hooks: Option<Box<dyn FormsetHooks>>,
}

impl FormsetBuilder {
    /// Sets the counters. Without them the collection is unbounded.
    ///
    /// The declared total is checked against the classified rows.
    pub fn management(mut self, management: ManagementForm) -> Self {
        self.declared_total = Some(management.total);
        self.management = Some(management);
        self
    }

    /// Sets only the bounds; the total is taken from the rows.
    pub fn bounds(mut self, max: Option<usize>, min: Option<usize>) -> Self {
        let management = self
            .management
            .take()
            .unwrap_or_else(|| ManagementForm::new(&self.options.prefix));
        self.management = Some(management.with_max(max).with_min(min));
        self
    }

    /// Appends candidate rows, in document order.
    pub fn rows(mut self, rows: impl IntoIterator<Item = Node>) -> Self {
        self.candidates.extend(rows);
        self
    }

    /// Appends one candidate row.
    pub fn row(mut self, row: impl Into<Node>) -> Self {
        self.candidates.push(row.into());
        self
    }

    /// Appends every element of `document` matching `selector` as a
    /// candidate, and reads the management form from `document`.
    pub fn select_rows(mut self, document: &Node, selector: &str) -> FormsetResult<Self> {
        let selector = Selector::parse(selector).map_err(|source| FormsetError::InvalidSelector {
            option: "rows",
            source,
        })?;
        self.candidates
            .extend(selector.select(document).into_iter().cloned().map(Node::from));
        if self.management.is_none() {
            let management = ManagementForm::from_node(document, &self.options.prefix);
            self = self.management(management);
        }
        Ok(self)
    }

    /// Uses `element` as the explicit template.
    pub fn template(mut self, element: HtmlElement) -> Self {
        self.template = Some(element);
        self
    }

    /// Tree searched for the `formTemplate` selector. When no selector is
    /// set, or the default one matches nothing, its first element is the
    /// explicit template.
    pub fn template_source(mut self, source: Node) -> Self {
        self.template_source = Some(source);
        self
    }

    /// Installs post-transition hooks.
    pub fn hooks(mut self, hooks: impl FormsetHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    /// Classifies the candidates, prepares the template and evaluates the
    /// visibility policy.
    pub fn build(self) -> FormsetResult<Formset> {
        let config = self.options.resolve()?;
        let pattern = IndexPattern::new(&config.prefix)?;
        let mut management = self
            .management
            .unwrap_or_else(|| ManagementForm::new(&config.prefix));
        if management.prefix != config.prefix {
            log::warn!(
                "management form prefix {} does not match formset prefix {}",
                management.prefix,
                config.prefix
            );
            management.prefix = config.prefix.clone();
        }

        let mut candidates = self.candidates;
        let source_first = || {
            self.template_source
                .as_ref()
                .and_then(|source| source.find(&|_| true))
                .cloned()
        };
        let explicit = match (self.template, &config.form_template) {
            (Some(element), _) => Some(element),
            (None, Some(selector)) => {
                let found = self
                    .template_source
                    .as_ref()
                    .and_then(|source| selector.select_first(source))
                    .cloned();
                let pos = candidates
                    .iter()
                    .position(|c| c.as_element().is_some_and(|el| selector.matches(el)));
                match (found, pos) {
                    (Some(element), _) => Some(element),
                    (None, Some(pos)) => match candidates.remove(pos) {
                        Node::Element(element) => Some(element),
                        _ => None,
                    },
                    (None, None) if selector.as_str() == DEFAULT_FORM_TEMPLATE => source_first(),
                    (None, None) => {
                        return Err(FormsetError::TemplateNotFound(selector.as_str().into()));
                    }
                }
            }
            (None, None) => source_first(),
        };

        let (layout, columns) = candidates
            .iter()
            .find_map(Node::as_element)
            .map(|first| (RowLayout::of(first), first.child_elements().count()))
            .unwrap_or((RowLayout::Container, 0));

        let mut slots = Vec::with_capacity(candidates.len());
        let mut next_id = 0;
        let mut ordinal = 0;
        let mut row_count = 0;
        for candidate in candidates {
            match classify(candidate, &config) {
                Classified::Inert(node) => slots.push(Slot::Inert(node)),
                Classified::Row(mut element, state) => {
                    if state == RowState::Active {
                        decorate(&mut element, &config, ordinal);
                        ordinal += 1;
                    }
                    let index = match pattern.index_of(&element) {
                        Some(RowIndex::At(index)) => index,
                        _ => row_count,
                    };
                    slots.push(Slot::Row(Row {
                        id: RowId(next_id),
                        element,
                        state,
                        index,
                    }));
                    next_id += 1;
                    row_count += 1;
                }
            }
        }

        let template = match explicit {
            Some(element) => Some(Template::explicit(element, &config, &pattern)),
            None => slots
                .iter()
                .rev()
                .find_map(Slot::as_row)
                .map(|last| Template::derive(&last.element, &config, &pattern)),
        };
        if template.is_none() {
            log::debug!("{}: no rows and no template, adding is disabled", config.prefix);
        }

        let mut formset = Formset {
            config,
            pattern,
            management,
            slots,
            template,
            layout,
            columns,
            visibility: Visibility::evaluate(0, 0, None, None),
            next_id,
            hooks: self.hooks.unwrap_or_else(|| Box::new(NoopHooks)),
        };
        formset.refresh();
        if let Some(declared_total) = self.declared_total
            && formset.total() != declared_total
        {
            log::warn!(
                "{}: TOTAL_FORMS was {declared_total}, but {} rows are counted",
                formset.config.prefix,
                formset.total()
            );
        }
        Ok(formset)
    }
}

fn is_counted(mode: TotalForms, row: &Row) -> bool {
    match mode {
        TotalForms::Active => row.is_active(),
        TotalForms::IncludeDeleted => true,
    }
}

impl Formset {
    /// Starts building a collection.
    pub fn builder(options: FormsetOptions) -> FormsetBuilder {
        FormsetBuilder {
            options,
            management: None,
            declared_total: None,
            candidates: Vec::new(),
            template: None,
            template_source: None,
            hooks: None,
        }
    }

    /// Builds a collection from counters and candidate rows.
    pub fn new(
        options: FormsetOptions,
        management: ManagementForm,
        rows: impl IntoIterator<Item = Node>,
    ) -> FormsetResult<Self> {
        Self::builder(options)
            .management(management)
            .rows(rows)
            .build()
    }

    /// The resolved configuration.
    pub fn config(&self) -> &FormsetConfig {
        &self.config
    }

    /// The collection name.
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// The counters, with the total kept current.
    pub fn management_form(&self) -> &ManagementForm {
        &self.management
    }

    /// The value of `TOTAL_FORMS`.
    pub fn total(&self) -> usize {
        self.management.total
    }

    /// Soft-deleted rows included in the total.
    pub fn deleted_count(&self) -> usize {
        match self.config.total_forms {
            TotalForms::Active => 0,
            TotalForms::IncludeDeleted => self.rows().filter(|row| row.is_marked_deleted()).count(),
        }
    }

    /// The policy as of the last transition.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the add affordance is shown.
    pub fn can_add(&self) -> bool {
        self.visibility.can_add
    }

    /// Whether delete affordances are shown.
    pub fn can_delete(&self) -> bool {
        self.visibility.can_delete
    }

    /// The layout of the rows.
    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    /// The template, if one could be prepared.
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// All slots in order, inert ones included.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Managed rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.slots.iter().filter_map(Slot::as_row)
    }

    /// Active rows in order.
    pub fn active_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows().filter(|row| row.is_active())
    }

    /// The row with the given handle.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows().find(|row| row.id == id)
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_row().is_some_and(|row| row.id == id))
    }

    /// Appends a row stamped from the template, numbered with the current
    /// total. Returns `None` when there is no template.
    ///
    /// The add affordance being hidden does not prevent the transition.
    pub fn add(&mut self) -> Option<RowId> {
        let Some(template) = &self.template else {
            log::warn!("{}: no template to add a row from", self.config.prefix);
            return None;
        };
        let index = self.management.total;
        if self.active_rows().any(|row| row.index == index) {
            log::warn!(
                "{}: added row shares index {index} with an active row",
                self.config.prefix
            );
        }
        let mut element = template.stamp();
        self.config.apply_extra_classes(&mut element, index);
        self.pattern.renumber_row(&mut element, RowIndex::At(index));
        insert_delete_affordance(&self.config, &mut element);

        let id = RowId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot::Row(Row {
            id,
            element,
            state: RowState::Active,
            index,
        }));
        self.refresh();
        log::debug!("{}: added {id} at index {index}", self.config.prefix);

        if let Some(row) = self.slots.last().and_then(Slot::as_row) {
            self.hooks.added(row);
        }
        Some(id)
    }

    /// Deletes a row.
    ///
    /// Rows with a soft-delete control are marked and hidden; others are
    /// removed and the remaining rows renumbered. Unknown handles are
    /// ignored and leave the event to propagate.
    pub fn delete(&mut self, id: RowId) -> Propagation {
        let Some(pos) = self.position(id) else {
            log::warn!("{}: ignoring delete of unknown {id}", self.config.prefix);
            return Propagation::Continue;
        };

        let Some(row) = self.slots[pos].as_row_mut() else {
            return Propagation::Continue;
        };
        if let Some(control) = soft_delete_control_mut(&mut row.element) {
            if row.state == RowState::SoftDeleted {
                log::debug!("{}: {id} is already deleted", self.config.prefix);
                return Propagation::Stop;
            }
            control.set_value(DELETED_VALUE);
            row.element.hide();
            row.state = RowState::SoftDeleted;
            self.restyle();
            self.refresh();
            log::debug!("{}: soft-deleted {id}", self.config.prefix);

            if let Some(row) = self.slots[pos].as_row() {
                self.hooks.removed(row);
            }
        } else {
            let Slot::Row(row) = self.slots.remove(pos) else {
                return Propagation::Continue;
            };
            self.renumber();
            self.restyle();
            self.refresh();
            log::debug!("{}: removed {id}", self.config.prefix);

            self.hooks.removed(&row);
        }
        Propagation::Stop
    }

    /// Deletes the active row at `position` (zero-based, visual order).
    pub fn delete_at(&mut self, position: usize) -> Propagation {
        let id = self.active_rows().nth(position).map(Row::id);
        match id {
            Some(id) => self.delete(id),
            None => {
                log::warn!(
                    "{}: ignoring delete of active row {position}, only {} exist",
                    self.config.prefix,
                    self.active_rows().count()
                );
                Propagation::Continue
            }
        }
    }

    /// Runs the transition an event asks for.
    pub fn dispatch(&mut self, event: FormsetEvent) -> Propagation {
        match event {
            FormsetEvent::Add => {
                self.add();
                Propagation::Stop
            }
            FormsetEvent::Delete(id) => self.delete(id),
        }
    }

    /// Writes indices `0..` into the counted rows, in order.
    fn renumber(&mut self) {
        let mode = self.config.total_forms;
        let rows = self.slots.iter_mut().filter_map(Slot::as_row_mut);
        for (index, row) in rows.filter(|row| is_counted(mode, row)).enumerate() {
            self.pattern.renumber_row(&mut row.element, RowIndex::At(index));
            row.index = index;
        }
    }

    /// Reapplies alternating classes over the counted rows.
    fn restyle(&mut self) {
        let mode = self.config.total_forms;
        let rows = self.slots.iter_mut().filter_map(Slot::as_row_mut);
        for (ordinal, row) in rows.filter(|row| is_counted(mode, row)).enumerate() {
            self.config.apply_extra_classes(&mut row.element, ordinal);
        }
    }

    /// Recounts the total and pushes the policy onto the affordances.
    fn refresh(&mut self) {
        let mode = self.config.total_forms;
        let total = self.rows().filter(|row| is_counted(mode, row)).count();
        self.management.total = total;
        self.visibility = Visibility::evaluate(
            total,
            self.deleted_count(),
            self.management.max,
            self.management.min,
        );

        let can_delete = self.visibility.can_delete;
        for row in self.slots.iter_mut().filter_map(Slot::as_row_mut) {
            set_delete_visible(&self.config, &mut row.element, can_delete);
        }
    }

    /// Projects the collection onto a fragment: slots in order, the explicit
    /// template (hidden), then the add affordance.
    pub fn to_node(&self) -> Node {
        let mut nodes = self.slots.iter().map(Slot::to_node).collect::<Vec<_>>();
        if let Some(template) = &self.template {
            if template.is_explicit() {
                nodes.push(template.element().clone().into());
            }
            nodes.push(
                add_affordance(
                    &self.config,
                    self.layout,
                    self.columns,
                    self.visibility.can_add,
                )
                .into(),
            );
        }
        Node::Fragment(nodes)
    }

    /// Renders [`Self::to_node`] to HTML.
    pub fn render_html(&self, options: HtmlWriterOptions) -> FormsetResult<EcoString> {
        let mut writer = HtmlWriter::with_options(options);
        writer.write_node(&self.to_node())?;
        Ok(writer.into_string())
    }

    /// A serializable view of the current state.
    pub fn summary(&self) -> FormsetSummary {
        FormsetSummary {
            management: self.management.clone(),
            deleted_count: self.deleted_count(),
            visibility: self.visibility,
            rows: self
                .rows()
                .map(|row| RowSummary {
                    id: row.id,
                    index: row.index,
                    state: row.state,
                    visible: row.is_visible(),
                    has_delete_control: soft_delete_control(&row.element).is_some(),
                })
                .collect(),
        }
    }
}

/// Serializable state of a [`Formset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormsetSummary {
    /// The counters.
    #[serde(flatten)]
    pub management: ManagementForm,
    /// Soft-deleted rows included in the total.
    pub deleted_count: usize,
    /// The affordance policy.
    #[serde(flatten)]
    pub visibility: Visibility,
    /// Every managed row, in order.
    pub rows: Vec<RowSummary>,
}

/// Serializable state of a [`Row`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSummary {
    /// The stable handle.
    pub id: RowId,
    /// The index last written into the row's fields.
    pub index: usize,
    /// The classification.
    pub state: RowState,
    /// Whether the row is rendered visible.
    pub visible: bool,
    /// Whether deleting the row is a soft delete.
    pub has_delete_control: bool,
}
