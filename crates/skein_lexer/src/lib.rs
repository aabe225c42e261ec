//! skein: a general-purpose lexical tokenizer.
//!
//! A [`Lexer`] is a cursor over an immutable source string. Each
//! [`next`](Lexer::next) call classifies the token at the cursor
//! (identifier, number, string, bracket, operator, whitespace, newline,
//! or symbol) and advances past it. Whitespace is suppressed by default.
//!
//! ```
//! use skein_lexer::{Lexer, TokenType};
//!
//! let mut lex = Lexer::new("let total = 101");
//! assert_eq!(lex.text(), "let");
//! lex.next().next();
//! assert_eq!(lex.text(), "=");
//! assert_eq!(lex.next().token_type(), TokenType::NUMBER);
//! ```
//!
//! Lookahead never loses state: [`peek`](Lexer::peek) scans an owned
//! secondary cursor, and [`sync_peek`](Lexer::sync_peek) commits it
//! after a successful speculative parse. Scanning is total: it never
//! fails for any input, so only the assertion helpers
//! ([`assert`](Lexer::assert), [`assert_char`](Lexer::assert_char))
//! produce errors, each carrying a rendered three-line source window.

pub mod lexer;
mod scan;
pub mod symbol_trie;
pub mod table;
pub mod token;

pub use lexer::{Lexer, LexerOptions};
pub use skein_diagnostic::SyntaxError;
pub use symbol_trie::SymbolTrie;
pub use token::TokenType;
