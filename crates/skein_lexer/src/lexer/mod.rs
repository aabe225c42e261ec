//! The cursor: the public tokenizing interface.
//!
//! A [`Lexer`] is a scanning position over a shared, immutable source
//! string. Construction scans the first token immediately (unless
//! deferred), and every [`next`](Lexer::next) call advances to the
//! following one. Copies and peek cursors share the same source
//! allocation, so lookahead and backtracking never copy text.
//!
//! # Lookahead
//!
//! [`peek`](Lexer::peek) advances a lazily-allocated child cursor and
//! leaves the primary untouched; [`sync_peek`](Lexer::sync_peek) commits
//! the child's position after a successful speculative parse.
//! [`fence_to`](Lexer::fence_to) bounds scanning at another cursor's
//! position, for "parse exactly until this point" patterns.

use std::fmt;
use std::sync::Arc;

use skein_diagnostic::{column_in_line, render_source_window, SyntaxError, WindowOptions};

use crate::scan::{self, ScanContext, ScanFlags, ScanState};
use crate::symbol_trie::SymbolTrie;
use crate::table::{base_table, CharClass};
use crate::token::TokenType;

/// Construction configuration for [`Lexer::with_options`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Surface whitespace and newline tokens instead of skipping them.
    pub include_whitespace_tokens: bool,
    /// Defer the initial scan; the cursor starts in the pre-scan state
    /// with a [`TokenType::NONE`] token at offset zero.
    pub start_peeking_only: bool,
}

/// A tokenizing cursor over a shared source string.
pub struct Lexer {
    source: Arc<str>,
    state: ScanState,
    /// Effective end of input. At most `source.len()`, shortened by
    /// [`fence_to`](Lexer::fence_to) and [`trim`](Lexer::trim).
    fence: usize,
    flags: ScanFlags,
    /// Owned child cursor for non-destructive lookahead.
    peek_cursor: Option<Box<Lexer>>,
    /// Registered custom symbols; persists across `next` and
    /// `set_source` until cleared.
    symbol_map: Option<SymbolTrie>,
}

impl Lexer {
    /// Create a cursor over `source` and scan the first token.
    ///
    /// Whitespace and newline tokens are suppressed; use
    /// [`with_options`](Lexer::with_options) to surface them.
    pub fn new(source: impl Into<Arc<str>>) -> Lexer {
        Lexer::with_options(source, LexerOptions::default())
    }

    /// Create a cursor with explicit configuration.
    pub fn with_options(source: impl Into<Arc<str>>, options: LexerOptions) -> Lexer {
        let source = source.into();
        let fence = source.len();
        let mut lexer = Lexer {
            source,
            state: ScanState::start(),
            fence,
            flags: ScanFlags {
                ignore_whitespace: !options.include_whitespace_tokens,
                ..ScanFlags::default()
            },
            peek_cursor: None,
            symbol_map: None,
        };
        if !options.start_peeking_only {
            lexer.next();
        }
        lexer
    }

    // === Scanning ===

    /// Advance to the next token.
    ///
    /// At end of input this produces the zero-length terminal token
    /// ([`TokenType::NONE`]) and is idempotent from then on. Scanning
    /// never fails for any input.
    #[allow(
        clippy::should_implement_trait,
        reason = "`next` is the documented advance operation of a cursor, not an Iterator"
    )]
    pub fn next(&mut self) -> &mut Lexer {
        let ctx = ScanContext {
            source: self.source.as_ref(),
            fence: self.fence,
            flags: self.flags,
            symbols: self.symbol_map.as_ref(),
        };
        scan::advance(&mut self.state, &ctx);
        self
    }

    /// Restore the cursor to the start of its source and scan the first
    /// token. The fence and all configuration flags are kept.
    pub fn reset(&mut self) -> &mut Lexer {
        self.reset_head();
        self.next();
        self
    }

    /// Restore the cursor to the start of its source without scanning.
    pub fn reset_head(&mut self) -> &mut Lexer {
        self.state = ScanState::start();
        self.peek_cursor = None;
        self
    }

    /// Rebind the cursor to a new source string.
    ///
    /// The fence widens to the new string's length and any peek cursor
    /// is dropped (it was bound to the old string). Registered symbols
    /// persist. With `reset` set, the position returns to the start
    /// (without scanning, mirroring [`reset_head`](Lexer::reset_head)).
    pub fn set_source(&mut self, source: impl Into<Arc<str>>, reset: bool) -> &mut Lexer {
        self.source = source.into();
        self.fence = self.source.len();
        self.peek_cursor = None;
        if reset {
            self.reset_head();
        }
        self
    }

    // === Peek / sync ===

    /// Look at the token after the current one without moving.
    ///
    /// The returned cursor is an owned child bound to the same source.
    /// Repeated peeks without an intervening mutation re-derive the same
    /// token. The child inherits this cursor's flags, fence, and
    /// registered symbols for the scan.
    pub fn peek(&mut self) -> &Lexer {
        let state = self.state;
        let fence = self.fence;
        let flags = self.flags;
        let source = Arc::clone(&self.source);

        let peek = self.peek_cursor.get_or_insert_with(|| {
            Box::new(Lexer {
                source,
                state,
                fence,
                flags,
                peek_cursor: None,
                symbol_map: None,
            })
        });
        peek.state = state;
        peek.fence = fence;
        peek.flags = flags;

        let ctx = ScanContext {
            source: self.source.as_ref(),
            fence,
            flags,
            symbols: self.symbol_map.as_ref(),
        };
        scan::advance(&mut peek.state, &ctx);
        &**peek
    }

    /// Copy `marker`'s position and flags onto this cursor.
    ///
    /// # Panics
    ///
    /// Panics when the two cursors are not bound to the same source
    /// string. That is a programmer error (the position would be
    /// meaningless), never a recoverable runtime case.
    pub fn sync(&mut self, marker: &Lexer) -> &mut Lexer {
        assert!(
            self.same_source(marker),
            "cannot sync cursors bound to different source strings"
        );
        self.state = marker.state;
        self.flags = marker.flags;
        self
    }

    /// Commit the peek cursor's position, if one exists.
    pub fn sync_peek(&mut self) -> &mut Lexer {
        if let Some(peek) = self.peek_cursor.take() {
            self.state = peek.state;
            self.flags = peek.flags;
            self.peek_cursor = Some(peek);
        }
        self
    }

    /// Restrict scanning to end where `boundary` currently sits.
    ///
    /// No-op when the two cursors are bound to different sources.
    pub fn fence_to(&mut self, boundary: &Lexer) -> &mut Lexer {
        if self.same_source(boundary) {
            self.fence = boundary.state.offset;
        }
        self
    }

    /// Duplicate this cursor's full state into `destination`, rebinding
    /// it to this cursor's source. The destination's peek cache is
    /// dropped.
    pub fn copy_into(&self, destination: &mut Lexer) {
        destination.source = Arc::clone(&self.source);
        destination.state = self.state;
        destination.fence = self.fence;
        destination.flags = self.flags;
        destination.symbol_map = self.symbol_map.clone();
        destination.peek_cursor = None;
    }

    fn same_source(&self, other: &Lexer) -> bool {
        Arc::ptr_eq(&self.source, &other.source) || self.source == other.source
    }

    // === Search ===

    /// Locate the first occurrence of `needle` after the current token.
    ///
    /// The search slides character-by-character using the scan engine in
    /// characters-only mode, so it follows the same whitespace rules as
    /// this cursor (with suppression on, whitespace runs on either side
    /// are transparent). Returns a cursor whose token begins at the
    /// match, or a cursor at end of input when there is none.
    pub fn find(&self, needle: &str) -> Lexer {
        let mut probe = self.clone();
        probe.next();
        probe.state.token_len = 0;
        let chars_only = probe.flags.characters_only;
        probe.flags.characters_only = true;

        // The needle walks with the probe's own configuration, so both
        // sides agree on whitespace visibility and table variant.
        let matcher = {
            let mut matcher = Lexer::with_options(
                needle,
                LexerOptions {
                    start_peeking_only: true,
                    ..LexerOptions::default()
                },
            );
            matcher.flags = probe.flags;
            matcher
        };

        while !probe.is_end() {
            let mut fwd = probe.clone();
            fwd.next();
            let mut pat = matcher.clone();
            pat.next();

            while !pat.is_end() && !fwd.is_end() && fwd.text() == pat.text() {
                fwd.next();
                pat.next();
            }

            if pat.is_end() {
                probe.flags.characters_only = chars_only;
                probe.next();
                return probe;
            }
            probe.next();
        }

        probe.flags.characters_only = chars_only;
        probe
    }

    // === Whitespace trimming ===

    /// A copy of this cursor with leading and trailing whitespace
    /// excluded from its effective range.
    ///
    /// Up to `leading_keep` leading and `trailing_keep` trailing
    /// whitespace characters survive. Keeping any leading whitespace
    /// also turns whitespace tokens back on for the copy, so the kept
    /// characters surface. The copy is re-scanned before returning.
    pub fn trim(&self, leading_keep: usize, trailing_keep: usize) -> Lexer {
        let table = base_table();
        let is_blank = |ch: char| {
            matches!(
                table.class(ch),
                CharClass::Space | CharClass::Tab | CharClass::CarriageReturn | CharClass::LineFeed
            )
        };
        let mut lex = self.clone();

        let run_start = lex.state.offset.min(lex.fence);
        let mut i = run_start;
        while i < lex.fence {
            let Some(ch) = lex.source[i..].chars().next() else {
                break;
            };
            if !is_blank(ch) {
                break;
            }
            i += ch.len_utf8();
        }
        lex.state.offset = run_start + (i - run_start).saturating_sub(leading_keep);

        let bytes = lex.source.as_bytes();
        let mut j = lex.fence;
        while j > lex.state.offset && matches!(bytes[j - 1], b' ' | b'\t' | b'\r' | b'\n') {
            j -= 1;
        }
        let trailing_run = lex.fence - j;
        lex.fence = j + trailing_run.min(trailing_keep);

        if leading_keep > 0 {
            lex.flags.ignore_whitespace = false;
        }
        lex.state.token_len = 0;
        lex.next();
        lex
    }

    // === Comments ===

    /// Skip a `//` line comment or `/* ... */` block comment starting at
    /// the current token.
    ///
    /// With `must_exist` set, returns a syntax error when the cursor is
    /// not at the start of a comment. An unterminated block comment is
    /// an error regardless. Without a comment (and without `must_exist`)
    /// the cursor is left untouched.
    pub fn comment(&mut self, must_exist: bool) -> Result<&mut Lexer, SyntaxError> {
        if self.current_char() != Some('/') {
            if must_exist {
                return Err(self.syntax_error("expected the start of a comment"));
            }
            return Ok(self);
        }
        if self.peek().current_char() == Some('*') {
            self.sync_peek();
            while !self.is_end() {
                self.next();
                if self.current_char() == Some('*') && self.peek().current_char() == Some('/') {
                    break;
                }
            }
            self.sync_peek();
            self.assert("/")?;
        } else if self.peek().current_char() == Some('/') {
            // Newlines must surface to terminate the comment.
            let ignore = self.flags.ignore_whitespace;
            self.flags.ignore_whitespace = false;
            while !self.is_end() && !self.state.ty.intersects(TokenType::NEW_LINE) {
                self.next();
            }
            self.flags.ignore_whitespace = ignore;
            self.next();
        } else if must_exist {
            return Err(self.syntax_error("expected the start of a comment"));
        }
        Ok(self)
    }

    // === Assertions ===

    /// Advance past the current token when its text equals `text`,
    /// otherwise return a syntax error with source context.
    pub fn assert(&mut self, text: &str) -> Result<&mut Lexer, SyntaxError> {
        if self.is_end() {
            return Err(self.syntax_error(&format!("expected [{text}] but found end of input")));
        }
        if self.text() == text {
            self.next();
            Ok(self)
        } else {
            Err(self.syntax_error(&format!(
                "expected [{text}] but found [{}]",
                self.text()
            )))
        }
    }

    /// Advance past the current token when its first character equals
    /// `expected`, otherwise return a syntax error with source context.
    pub fn assert_char(&mut self, expected: char) -> Result<&mut Lexer, SyntaxError> {
        if self.is_end() {
            return Err(
                self.syntax_error(&format!("expected [{expected}] but found end of input"))
            );
        }
        match self.current_char() {
            Some(found) if found == expected => {
                self.next();
                Ok(self)
            }
            Some(found) => {
                Err(self.syntax_error(&format!("expected [{expected}] but found [{found}]")))
            }
            None => Err(self.syntax_error(&format!("expected [{expected}] but found end of input"))),
        }
    }

    // === Custom symbols ===

    /// Register a multi-character symbol that the scan engine matches
    /// ahead of generic classification (longest registration wins).
    /// The registry is append-only; see
    /// [`clear_symbols`](Lexer::clear_symbols).
    pub fn add_symbol(&mut self, symbol: &str) -> &mut Lexer {
        self.symbol_map
            .get_or_insert_with(SymbolTrie::new)
            .insert(symbol);
        self
    }

    /// Drop every registered symbol.
    pub fn clear_symbols(&mut self) -> &mut Lexer {
        self.symbol_map = None;
        self
    }

    // === Accessors ===

    /// The full source string (ignores the fence).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text of the current token. Empty at end of input.
    pub fn text(&self) -> &str {
        self.source
            .get(self.state.offset..self.state.offset + self.state.token_len)
            .unwrap_or("")
    }

    /// Classification of the current token.
    pub fn token_type(&self) -> TokenType {
        self.state.ty
    }

    /// The character at the cursor position, or `None` at the end of the
    /// underlying string.
    pub fn current_char(&self) -> Option<char> {
        self.source.get(self.state.offset..)?.chars().next()
    }

    /// Byte offset of the current token's start.
    pub fn offset(&self) -> usize {
        self.state.offset
    }

    /// Byte length of the current token.
    pub fn token_len(&self) -> usize {
        self.state.token_len
    }

    /// 0-based line of the current token.
    pub fn line(&self) -> usize {
        self.state.line
    }

    /// Column of the current token: the byte distance from the start of
    /// the newline token that opened the line (from the start of input
    /// on line 0).
    pub fn column(&self) -> usize {
        self.state.column
    }

    /// Whether the cursor has reached its effective end of input.
    pub fn is_end(&self) -> bool {
        self.state.offset >= self.fence
    }

    /// Bytes remaining between the cursor and its effective end.
    pub fn remaining_len(&self) -> usize {
        self.fence.saturating_sub(self.state.offset)
    }

    /// Source text from `start` up to the current token's start, or up
    /// to the effective end when the cursor is not past `start`.
    pub fn slice_from(&self, start: usize) -> &str {
        let end = if self.state.offset <= start {
            self.fence.min(self.source.len())
        } else {
            self.state.offset
        };
        self.source.get(start.min(end)..end).unwrap_or("")
    }

    /// [`slice_from`](Lexer::slice_from) starting at another cursor's
    /// position.
    pub fn slice_since(&self, mark: &Lexer) -> &str {
        self.slice_from(mark.state.offset)
    }

    // === Configuration flags ===

    /// Whether whitespace and newline tokens are suppressed.
    pub fn ignore_whitespace(&self) -> bool {
        self.flags.ignore_whitespace
    }

    pub fn set_ignore_whitespace(&mut self, on: bool) -> &mut Lexer {
        self.flags.ignore_whitespace = on;
        self
    }

    /// Whether quote characters are emitted as single symbols.
    pub fn parse_strings_as_symbols(&self) -> bool {
        self.flags.parse_strings_as_symbols
    }

    pub fn set_parse_strings_as_symbols(&mut self, on: bool) -> &mut Lexer {
        self.flags.parse_strings_as_symbols = on;
        self
    }

    /// Whether tokens are clamped to their first character.
    pub fn characters_only(&self) -> bool {
        self.flags.characters_only
    }

    pub fn set_characters_only(&mut self, on: bool) -> &mut Lexer {
        self.flags.characters_only = on;
        self
    }

    /// Whether `-` and `_` continue identifiers.
    pub fn extended_identifiers(&self) -> bool {
        self.flags.extended_identifiers
    }

    pub fn set_extended_identifiers(&mut self, on: bool) -> &mut Lexer {
        self.flags.extended_identifiers = on;
        self
    }

    /// Whether numeric sub-kinds are tagged.
    pub fn extended_number_types(&self) -> bool {
        self.flags.extended_number_types
    }

    pub fn set_extended_number_types(&mut self, on: bool) -> &mut Lexer {
        self.flags.extended_number_types = on;
        self
    }

    // === Diagnostics ===

    /// Render the three-line source window around the current token.
    pub fn error_message(&self, message: &str, window_size: usize, tab_size: usize) -> String {
        render_source_window(
            &self.source,
            self.state.offset,
            self.state.line,
            message,
            None,
            &WindowOptions {
                window_size,
                tab_size,
            },
        )
    }

    /// Build a structured syntax error at the current token, carrying
    /// the rendered source window as its display text.
    pub fn syntax_error(&self, message: &str) -> SyntaxError {
        let rendered = render_source_window(
            &self.source,
            self.state.offset,
            self.state.line,
            message,
            None,
            &WindowOptions::default(),
        );
        SyntaxError::new(
            rendered,
            self.state.line + 1,
            column_in_line(&self.source, self.state.offset),
            None,
        )
    }
}

impl Clone for Lexer {
    /// Duplicate the cursor: same source allocation, same position and
    /// configuration, same registered symbols. The lookahead cache is
    /// not part of the position and starts out empty on the copy.
    fn clone(&self) -> Lexer {
        Lexer {
            source: Arc::clone(&self.source),
            state: self.state,
            fence: self.fence,
            flags: self.flags,
            peek_cursor: None,
            symbol_map: self.symbol_map.clone(),
        }
    }
}

impl fmt::Display for Lexer {
    /// The unconsumed remainder of the effective range.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slice_from(self.state.offset))
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("text", &self.text())
            .field("ty", &self.state.ty)
            .field("offset", &self.state.offset)
            .field("line", &self.state.line)
            .field("column", &self.state.column)
            .field("fence", &self.fence)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]
