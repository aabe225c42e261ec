//! Error reporting for the skein tokenizer.
//!
//! Two pieces live here:
//!
//! - [`source_window`]: renders a three-line window of source context
//!   around a byte offset, with an arrow pointing at the offending
//!   column. This is the diagram attached to every skein error message.
//! - [`SyntaxError`]: the structured error type carrying the rendered
//!   window as its display text plus `line`/`column`/`file` fields for
//!   programmatic consumers.
//!
//! The crate is deliberately standalone: it locates lines by searching
//! for linefeed bytes rather than consulting the tokenizer's
//! classification tables, so highlighters and external tools can use it
//! without depending on `skein_lexer`.

pub mod source_window;
pub mod syntax_error;

pub use source_window::{column_in_line, render_source_window, WindowOptions};
pub use syntax_error::SyntaxError;
