//! Structured syntax error carrying a rendered source window.

/// A syntax error at a known source position.
///
/// The display text is the full rendered source window (header, context
/// lines, arrow), so propagating the error with `?` all the way to a
/// terminal produces a readable report without extra tooling. The
/// position is also retained as structured fields for programmatic
/// consumers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{rendered}")]
pub struct SyntaxError {
    rendered: String,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based character column of the offending token.
    pub column: usize,
    /// Display name of the source, when one was supplied.
    pub file: Option<String>,
}

impl SyntaxError {
    /// Build an error from an already-rendered source window.
    pub fn new(rendered: String, line: usize, column: usize, file: Option<String>) -> Self {
        SyntaxError {
            rendered,
            line,
            column,
            file,
        }
    }

    /// The rendered source window, identical to the `Display` output.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}
