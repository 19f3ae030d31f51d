/// Options for configuring the HTML rendering process.
///
/// # Example
///
/// ```rust
/// use formset_dom::{HtmlWriter, HtmlWriterOptions};
///
/// let options = HtmlWriterOptions::default()
///     .with_strict(false)
///     .with_block_newlines(true);
///
/// let writer = HtmlWriter::with_options(options);
/// assert!(!writer.options().strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlWriterOptions {
    /// Determines if invalid tag or attribute names are an error (`true`) or
    /// are textualized with a warning (`false`).
    pub strict: bool,
    /// Emits a newline after every closed block-level element (table cells
    /// and inline elements excluded), which keeps rendered formsets diffable.
    pub block_newlines: bool,
}

impl Default for HtmlWriterOptions {
    fn default() -> Self {
        Self {
            strict: true,
            block_newlines: false,
        }
    }
}

impl HtmlWriterOptions {
    /// Sets strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether block-level elements are followed by a newline.
    pub fn with_block_newlines(mut self, block_newlines: bool) -> Self {
        self.block_newlines = block_newlines;
        self
    }
}
