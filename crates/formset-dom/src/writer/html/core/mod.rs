use super::{HtmlWriteError, HtmlWriteResult, HtmlWriterOptions, utils};
use crate::ast::{HtmlElement, Node};
use crate::writer::runtime::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use crate::writer::runtime::visitor::{NodeHandler, walk_node};
use ecow::{EcoString, eco_format};
use std::fmt;

/// HTML writer for serializing the form tree to markup.
///
/// `HtmlWriter` renders nodes through [`Self::write_node`], or builds markup
/// by hand with the tag and attribute methods.
///
/// # Examples
///
/// ## Rendering nodes
///
/// ```rust
/// use formset_dom::{HtmlElement, HtmlWriter, Node};
///
/// let mut writer = HtmlWriter::new();
/// let input = HtmlElement::new("input")
///     .with_attribute("name", "form-0-title")
///     .self_closing(true);
/// writer.write_node(&Node::from(input)).unwrap();
///
/// assert_eq!(writer.into_string().as_str(), "<input name=\"form-0-title\" />");
/// ```
///
/// ## Building markup by hand
///
/// ```rust
/// use formset_dom::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.start_tag("a").unwrap();
/// writer.attribute("class", "add-row").unwrap();
/// writer.text("add another").unwrap();
/// writer.end_tag("a").unwrap();
///
/// assert_eq!(writer.into_string().as_str(), "<a class=\"add-row\">add another</a>");
/// ```
pub struct HtmlWriter {
    options: HtmlWriterOptions,
    out: EcoString,
    /// A start tag has been written up to its attributes and awaits `>`.
    in_start_tag: bool,
    sink: Box<dyn DiagnosticSink>,
}

impl fmt::Debug for HtmlWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlWriter")
            .field("options", &self.options)
            .field("out", &self.out)
            .field("in_start_tag", &self.in_start_tag)
            .finish_non_exhaustive()
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlWriter {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::with_options(HtmlWriterOptions::default())
    }

    /// Creates a writer with the given options.
    pub fn with_options(options: HtmlWriterOptions) -> Self {
        Self {
            options,
            out: EcoString::new(),
            in_start_tag: false,
            sink: Box::new(NullSink),
        }
    }

    /// Reports textualized elements to `sink`.
    pub fn with_diagnostic_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &HtmlWriterOptions {
        &self.options
    }

    /// Consumes the writer and returns the markup.
    pub fn into_string(mut self) -> EcoString {
        self.close_start_tag();
        self.out
    }

    fn close_start_tag(&mut self) {
        if std::mem::take(&mut self.in_start_tag) {
            self.out.push('>');
        }
    }

    /// Opens a start tag; attributes may follow until content is written.
    pub fn start_tag(&mut self, tag: &str) -> HtmlWriteResult<()> {
        self.close_start_tag();
        self.out.push('<');
        self.out.push_str(tag);
        self.in_start_tag = true;
        Ok(())
    }

    /// Writes an attribute into the open start tag.
    pub fn attribute(&mut self, name: &str, value: &str) -> HtmlWriteResult<()> {
        if !self.in_start_tag {
            return Err(HtmlWriteError::NoOpenTag("attribute"));
        }
        self.out.push_str(&eco_format!(
            " {name}=\"{}\"",
            html_escape::encode_double_quoted_attribute(value)
        ));
        Ok(())
    }

    /// Ends the open start tag with ` />`.
    pub fn close_self_closing(&mut self) -> HtmlWriteResult<()> {
        if !std::mem::take(&mut self.in_start_tag) {
            return Err(HtmlWriteError::NoOpenTag("self-closing end"));
        }
        self.out.push_str(" />");
        Ok(())
    }

    /// Writes an end tag.
    pub fn end_tag(&mut self, tag: &str) -> HtmlWriteResult<()> {
        self.close_start_tag();
        self.out.push_str(&eco_format!("</{tag}>"));
        Ok(())
    }

    /// Writes escaped text.
    pub fn text(&mut self, text: &str) -> HtmlWriteResult<()> {
        self.close_start_tag();
        self.out.push_str(&html_escape::encode_text(text));
        Ok(())
    }

    /// Writes markup produced by the renderer itself, without escaping.
    pub fn raw(&mut self, html: &str) -> HtmlWriteResult<()> {
        self.close_start_tag();
        self.out.push_str(html);
        Ok(())
    }

    /// Writes a node and its subtree.
    pub fn write_node(&mut self, node: &Node) -> HtmlWriteResult<()> {
        walk_node(self, node)
    }

    /// Writes a single element and its subtree.
    ///
    /// Elements with names that cannot be written are an error in strict
    /// mode. Otherwise they are reported and written as escaped text.
    pub fn write_html_element(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        match rejection(element) {
            Some(err) if self.options.strict => return Err(err),
            Some(err) => {
                let diagnostic = Diagnostic::textualized(element, &err);
                log::warn!("{diagnostic}");
                self.sink.emit(diagnostic);
                self.write_textualized(element)?;
            }
            None => self.write_markup(element)?,
        }
        if self.options.block_newlines && utils::is_block_tag(&element.tag) {
            self.raw("\n")?;
        }
        Ok(())
    }

    fn write_markup(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        self.start_tag(&element.tag)?;
        for attr in &element.attributes {
            self.attribute(&attr.name, &attr.value)?;
        }
        let void = element.children.is_empty() && utils::is_void_tag(&element.tag);
        if element.self_closing || void {
            return self.close_self_closing();
        }
        self.visit_nodes(&element.children)?;
        self.end_tag(&element.tag)
    }

    fn write_textualized(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        let mut open = eco_format!("<{}", element.tag);
        for attr in &element.attributes {
            open.push_str(&eco_format!(" {}=\"{}\"", attr.name, attr.value));
        }
        if element.self_closing {
            open.push_str(" />");
            return self.text(&open);
        }
        open.push('>');
        self.text(&open)?;
        self.visit_nodes(&element.children)?;
        self.text(&eco_format!("</{}>", element.tag))
    }
}

/// The first name of `element` that cannot be written as markup.
fn rejection(element: &HtmlElement) -> Option<HtmlWriteError> {
    if !utils::is_safe_tag_name(&element.tag) {
        return Some(HtmlWriteError::InvalidTag(element.tag.clone()));
    }
    let attr = element
        .attributes
        .iter()
        .find(|attr| !utils::is_safe_attribute_name(&attr.name))?;
    Some(HtmlWriteError::InvalidAttribute {
        tag: element.tag.clone(),
        name: attr.name.clone(),
    })
}

impl NodeHandler for HtmlWriter {
    type Error = HtmlWriteError;

    fn element(&mut self, element: &HtmlElement) -> HtmlWriteResult<()> {
        self.write_html_element(element)
    }

    fn text(&mut self, text: &EcoString) -> HtmlWriteResult<()> {
        HtmlWriter::text(self, text)
    }
}
