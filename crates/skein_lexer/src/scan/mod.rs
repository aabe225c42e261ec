//! The token scan engine.
//!
//! [`advance`] classifies and measures the token beginning at the
//! cursor's current offset. It is a total function over all `&str`
//! inputs: it never panics, never errors, and always moves the position
//! forward by at least the consumed token's length, so a scan loop
//! terminates for every finite input.
//!
//! The engine operates on a plain [`ScanState`] plus a borrowed
//! [`ScanContext`] instead of a full cursor, so a primary cursor can
//! scan its peek child while lending out its own source and symbol trie.
//!
//! # Lenient recovery
//!
//! Scanning itself has no failure modes. An unterminated string closes
//! at end of input; a malformed exponent (`12e+x`) rolls back to the
//! last valid numeric boundary and leaves the remainder for the next
//! token.

use crate::symbol_trie::SymbolTrie;
use crate::table::{self, CharClass, JumpTable};
use crate::token::TokenType;

/// Position snapshot of one scanning cursor.
///
/// `Copy`, so peeking and backtracking are cheap state snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScanState {
    /// Byte offset of the current token's start.
    pub offset: usize,
    /// Byte length of the current token.
    pub token_len: usize,
    /// 0-based line of the current token (counts newline tokens).
    pub line: usize,
    /// Byte distance from the start of the newline token that opened the
    /// line (from the start of input on line 0).
    pub column: usize,
    /// Classification of the current token.
    pub ty: TokenType,
}

impl ScanState {
    /// The pre-scan state: position zero, no token, sentinel type.
    pub(crate) fn start() -> ScanState {
        ScanState {
            offset: 0,
            token_len: 0,
            line: 0,
            column: 0,
            ty: TokenType::NONE,
        }
    }
}

/// Cursor configuration consulted by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScanFlags {
    /// Skip whitespace and newline tokens instead of surfacing them.
    pub ignore_whitespace: bool,
    /// Emit quote characters as single symbols; the caller owns string
    /// parsing.
    pub parse_strings_as_symbols: bool,
    /// Clamp every token to its first character.
    pub characters_only: bool,
    /// Let `-` and `_` continue identifiers (selects the extended table).
    pub extended_identifiers: bool,
    /// Tag numeric sub-kinds (binary/octal/hex/integer/scientific/float).
    pub extended_number_types: bool,
}

/// Everything the engine borrows from the owning cursor for one call.
pub(crate) struct ScanContext<'a> {
    pub source: &'a str,
    /// Effective end of input; never scanned past.
    pub fence: usize,
    pub flags: ScanFlags,
    /// Registered custom symbols, matched ahead of classification.
    pub symbols: Option<&'a SymbolTrie>,
}

/// First character of `src[off..]`, or NUL when out of range.
///
/// Callers only pass offsets that sit on character boundaries; the NUL
/// fallback keeps the helper total.
#[inline]
fn char_at(src: &str, off: usize) -> char {
    src[off..].chars().next().unwrap_or('\0')
}

/// Advance past every character whose continue bits intersect `mask`.
#[inline]
fn eat_continue(src: &str, mut off: usize, fence: usize, table: &JumpTable, mask: u16) -> usize {
    while off < fence {
        let ch = char_at(src, off);
        if table.continue_bits(ch) & mask == 0 {
            break;
        }
        off += ch.len_utf8();
    }
    off
}

/// Scan a numeric token whose leading digit is `first` at `start`.
/// Returns the end offset and the (extended) token type.
fn scan_number(
    src: &str,
    start: usize,
    fence: usize,
    table: &JumpTable,
    first: char,
    extended: bool,
) -> (usize, TokenType) {
    let mut off = start + 1;
    let mut ty = TokenType::NUMBER;

    if first == '0' {
        // Radix prefix: 0b/0o/0x, committed only when a digit of that
        // radix follows. `0x` alone lexes as `0` then an identifier.
        if off < fence {
            let radix = match src.as_bytes()[off] {
                b'b' | b'B' => Some((table::BIN, TokenType::BINARY)),
                b'o' | b'O' => Some((table::OCT, TokenType::OCTAL)),
                b'x' | b'X' => Some((table::HEX, TokenType::HEXADECIMAL)),
                _ => None,
            };
            if let Some((mask, radix_ty)) = radix {
                let digits = off + 1;
                if digits < fence && table.continue_bits(char_at(src, digits)) & mask != 0 {
                    let end = eat_continue(src, digits, fence, table, mask);
                    return (end, if extended { radix_ty } else { TokenType::NUMBER });
                }
            }
        }
        // A bare zero: no leading-zero runs (0221 is two tokens), but
        // 0.5 and 0e3 still continue below.
    } else {
        off = eat_continue(src, off, fence, table, table::NUM);
    }

    if off < fence && src.as_bytes()[off] == b'.' {
        off = eat_continue(src, off + 1, fence, table, table::NUM);
        ty = TokenType::FLOAT;
    }

    if off < fence && matches!(src.as_bytes()[off], b'e' | b'E') {
        let mark = off;
        off += 1;
        if off < fence && matches!(src.as_bytes()[off], b'+' | b'-') {
            off += 1;
        }
        if off < fence && table.continue_bits(char_at(src, off)) & table::NUM != 0 {
            off = eat_continue(src, off, fence, table, table::NUM);
            ty = TokenType::SCIENTIFIC;
        } else {
            // No digit after the marker/sign: not an exponent.
            off = mark;
        }
    }

    if !extended {
        ty = TokenType::NUMBER;
    } else if ty == TokenType::NUMBER {
        ty = TokenType::INTEGER;
    }
    (off, ty)
}

/// Classify and measure the token at `state.offset + state.token_len`,
/// updating `state` in place.
///
/// At or past the fence this produces the terminal token: length 0, type
/// [`TokenType::NONE`], offset pinned to the fence. Repeated calls at
/// the end are idempotent.
pub(crate) fn advance(state: &mut ScanState, ctx: &ScanContext<'_>) {
    let src = ctx.source;
    let fence = ctx.fence.min(src.len());
    let table = if ctx.flags.extended_identifiers {
        table::extended_table()
    } else {
        table::base_table()
    };

    let mut off = state.offset + state.token_len;
    // Column bookkeeping: the new column is `col_base` plus the distance
    // from `root` to the new token's start. A consumed newline resets
    // both so the distance is measured from the line's opening token.
    let mut col_base = state.column;
    let mut root = state.offset;
    let mut line = state.line;

    if off >= fence {
        state.column = col_base + fence.saturating_sub(root);
        state.offset = fence;
        state.token_len = 0;
        state.ty = TokenType::NONE;
        return;
    }

    let mut ty = TokenType::SYMBOL;
    let mut base;
    let mut length;

    // Registered symbols take priority over classification. The trie is
    // consulted once per call, before the generic dispatch.
    let mut custom_len = None;
    if let Some(trie) = ctx.symbols {
        if ctx.flags.ignore_whitespace {
            while off < fence && src.as_bytes()[off] == b' ' {
                off += 1;
            }
            if off >= fence {
                // The skipped run was all that remained.
                state.column = col_base + (fence - root);
                state.offset = fence;
                state.token_len = 0;
                state.ty = TokenType::NONE;
                return;
            }
        }
        // Zero-length matches (an empty registered symbol) are ignored;
        // forward progress wins.
        custom_len = trie.match_at(&src[off..fence]).filter(|&len| len > 0);
    }

    if let Some(len) = custom_len {
        base = off;
        length = len;
    } else {
        loop {
            base = off;
            let ch = char_at(src, off);
            let width = ch.len_utf8();
            length = width;
            ty = TokenType::SYMBOL;

            match table.class(ch) {
                CharClass::Symbol => {}
                CharClass::IdentifierStart => {
                    off = eat_continue(src, off + width, fence, table, table::ID | table::NUM);
                    ty = TokenType::IDENTIFIER;
                    length = off - base;
                }
                CharClass::Quote => {
                    if !ctx.flags.parse_strings_as_symbols {
                        // Scan to the matching quote, both quotes
                        // included, no escape processing. End of input
                        // closes an unterminated string.
                        off += width;
                        while off < fence {
                            let c = char_at(src, off);
                            off += c.len_utf8();
                            if c == ch {
                                break;
                            }
                        }
                        ty = TokenType::STRING;
                        length = off - base;
                    }
                }
                CharClass::Space => {
                    off += 1;
                    while off < fence && src.as_bytes()[off] == b' ' {
                        off += 1;
                    }
                    ty = TokenType::WHITE_SPACE;
                    length = off - base;
                }
                CharClass::Tab => {
                    off += 1;
                    while off < fence && src.as_bytes()[off] == b'\t' {
                        off += 1;
                    }
                    ty = TokenType::WHITE_SPACE;
                    length = off - base;
                }
                CharClass::CarriageReturn | CharClass::LineFeed => {
                    // CRLF is one newline token of length 2. A lone CR
                    // still counts as a newline of length 1 so a token
                    // span never splits a following multi-byte character.
                    length = if ch == '\r' && off + 1 < fence && src.as_bytes()[off + 1] == b'\n' {
                        2
                    } else {
                        1
                    };
                    ty = TokenType::NEW_LINE;
                    line += 1;
                    col_base = 0;
                    root = base;
                    off += length;
                }
                CharClass::DigitStart => {
                    let (end, num_ty) =
                        scan_number(src, off, fence, table, ch, ctx.flags.extended_number_types);
                    ty = num_ty;
                    length = end - base;
                    off = end;
                }
                CharClass::Operator => ty = TokenType::OPERATOR,
                CharClass::OpenBracket => ty = TokenType::OPEN_BRACKET,
                CharClass::CloseBracket => ty = TokenType::CLOSE_BRACKET,
                CharClass::DataLinkEscape => {
                    // Sentinel plus embedded payload: nominally 4 units,
                    // extended to a character boundary and clamped to
                    // the fence.
                    let mut end = off + 1;
                    while end < fence && end - off < 4 {
                        end += char_at(src, end).len_utf8();
                    }
                    ty = TokenType::DATA_LINK;
                    length = end - off;
                }
            }

            if ctx.flags.ignore_whitespace && ty.intersects(TokenType::WHITE_SPACE_NEW_LINE) {
                if off < fence {
                    // Transparently skip whitespace: re-dispatch at the
                    // advanced offset.
                    continue;
                }
                // Only whitespace remained: the terminal token.
                base = fence;
                length = 0;
                ty = TokenType::NONE;
            }
            break;
        }
    }

    state.ty = ty;
    state.offset = base;
    state.token_len = if ctx.flags.characters_only && length > 0 {
        char_at(src, base).len_utf8().min(length)
    } else {
        length
    };
    state.column = col_base + (base - root);
    state.line = line;
}
