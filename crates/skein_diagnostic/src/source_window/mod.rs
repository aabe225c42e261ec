//! Three-line source-context window rendering.
//!
//! Given a byte offset into a source string, renders the previous,
//! current, and next lines with a caret arrow under the offending
//! column:
//!
//! ```text
//! unexpected token at 3:14
//! ━━━━━━━━━━━━━━━━━━━━━━━━━
//!  2: let total = 0
//!  3: total += amuont
//! ─────────────────⮉
//!  4: return total
//! ━━━━━━━━━━━━━━━━━━━━━━━━━
//! ```
//!
//! Tabs are normalized to a fixed number of spaces so the arrow lines up
//! regardless of the viewer's tab rendering. When a line is wider than
//! the configured window, the window is centered on the arrow column and
//! clip markers (`... ` / ` ...`) mark the truncated sides.
//!
//! Lines are located by searching for linefeed bytes (`\n`), which in
//! UTF-8 never occur inside a multi-byte sequence.

/// Arrow glyph rendered under the offending column.
const ARROW: char = '\u{2B89}';
/// Light horizontal rule leading up to the arrow.
const RULE: &str = "\u{2500}";
/// Heavy horizontal rule bordering the window top and bottom.
const BORDER: &str = "\u{2501}";
/// Marker prefixed to a line clipped on the left.
const CLIP_LEFT: &str = "... ";
/// Marker appended to a line clipped on the right.
const CLIP_RIGHT: &str = " ...";

/// Rendering configuration for [`render_source_window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    /// Maximum rendered width of each content line, in characters
    /// (excluding the line-number gutter and clip markers).
    pub window_size: usize,
    /// Number of spaces a tab character expands to.
    pub tab_size: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            window_size: 80,
            tab_size: 4,
        }
    }
}

/// Returns the 1-based character column of `offset` within its line.
///
/// Tabs count as a single character here; tab expansion only affects the
/// rendered window, not the reported column.
pub fn column_in_line(source: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(source, offset.min(source.len()));
    let line_start = memchr::memrchr(b'\n', &source.as_bytes()[..offset]).map_or(0, |i| i + 1);
    source[line_start..offset].chars().count() + 1
}

/// Render the three-line source window around `offset`.
///
/// `line` is the 0-based line number of `offset` (the caller tracks it
/// incrementally; it is only used for the gutter and the header, never
/// for locating text). `file` is an optional display name prefixed to
/// the `line:column` position in the header.
///
/// The previous and next lines are omitted when `offset` sits on the
/// first or last line of the source.
pub fn render_source_window(
    source: &str,
    offset: usize,
    line: usize,
    message: &str,
    file: Option<&str>,
    opts: &WindowOptions,
) -> String {
    let offset = floor_char_boundary(source, offset.min(source.len()));
    let bytes = source.as_bytes();
    let window = opts.window_size.max(1);

    let line_start = memchr::memrchr(b'\n', &bytes[..offset]).map_or(0, |i| i + 1);
    let line_end = memchr::memchr(b'\n', &bytes[offset..]).map_or(source.len(), |i| offset + i);

    let prev_line = (line_start > 0).then(|| {
        let prev_end = line_start - 1;
        let prev_start = memchr::memrchr(b'\n', &bytes[..prev_end]).map_or(0, |i| i + 1);
        strip_cr(&source[prev_start..prev_end])
    });
    let next_line = (line_end < source.len()).then(|| {
        let next_start = line_end + 1;
        let next_end =
            memchr::memchr(b'\n', &bytes[next_start..]).map_or(source.len(), |i| next_start + i);
        strip_cr(&source[next_start..next_end])
    });
    let curr_line = strip_cr(&source[line_start..line_end]);

    // Arrow position in expanded-character coordinates.
    let pointer: usize = source[line_start..offset]
        .chars()
        .map(|c| if c == '\t' { opts.tab_size } else { 1 })
        .sum();

    // Horizontal window centered on the arrow.
    let w_start = pointer.saturating_sub(window / 2);

    // Gutter sized to the widest 1-based line number on display.
    let max_display = if next_line.is_some() { line + 2 } else { line + 1 };
    let digits = decimal_width(max_display);
    let gutter = |n: usize| format!(" {n:>digits$}: ");
    let gutter_width = digits + 3;

    let clip_prefix = if w_start > 0 { CLIP_LEFT } else { "" };

    let content_row = |display: usize, text: &str| {
        let expanded = expand_tabs(text, opts.tab_size);
        let (body, clipped) = clip(&expanded, w_start, window);
        let suffix = if clipped { CLIP_RIGHT } else { "" };
        format!("{}{clip_prefix}{body}{suffix}", gutter(display))
    };

    let mut rows = Vec::with_capacity(4);
    if let Some(prev) = prev_line {
        rows.push(content_row(line, prev));
    }
    rows.push(content_row(line + 1, curr_line));
    rows.push(format!(
        "{}{ARROW}",
        RULE.repeat(gutter_width + clip_prefix.len() + (pointer - w_start))
    ));
    if let Some(next) = next_line {
        rows.push(content_row(line + 2, next));
    }

    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let border = BORDER.repeat(width);

    let position = match file {
        Some(file) => format!("{file}:{}:{}", line + 1, column_in_line(source, offset)),
        None => format!("{}:{}", line + 1, column_in_line(source, offset)),
    };

    let mut out = format!("{message} at {position}\n{border}\n");
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// Round `offset` down to the nearest character boundary.
fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while offset > 0 && !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Drop the carriage return left at the end of a CRLF-terminated line.
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn expand_tabs(line: &str, tab_size: usize) -> String {
    if line.contains('\t') {
        line.replace('\t', &" ".repeat(tab_size))
    } else {
        line.to_owned()
    }
}

/// Slice `expanded` to the window in character coordinates.
/// Returns the visible body and whether the right side was clipped.
fn clip(expanded: &str, w_start: usize, window: usize) -> (String, bool) {
    let total = expanded.chars().count();
    let body: String = expanded.chars().skip(w_start).take(window).collect();
    (body, total > w_start + window)
}

fn decimal_width(mut n: usize) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]
