/// Diagnostics sinks shared by writer backends.
pub mod diagnostics;
/// Node traversal shared by writer backends and tree queries.
pub mod visitor;
