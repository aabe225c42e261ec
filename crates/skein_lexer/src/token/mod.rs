//! Token classification bitmask.

use bitflags::bitflags;

bitflags! {
    /// Classification of a token, as a set of power-of-two tags.
    ///
    /// Single-bit tags classify a token directly; composite masks such
    /// as [`TokenType::ALPHA_NUMERIC`] exist for testing several classes
    /// with one `intersects` call. Extended numeric kinds layer an extra
    /// bit on top of [`TokenType::NUMBER`], so `ty.intersects(NUMBER)`
    /// holds for every numeric token regardless of kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TokenType: u32 {
        const NUMBER        = 1;
        const IDENTIFIER    = 1 << 1;
        const STRING        = 1 << 2;
        const WHITE_SPACE   = 1 << 3;
        const OPEN_BRACKET  = 1 << 4;
        const CLOSE_BRACKET = 1 << 5;
        const OPERATOR      = 1 << 6;
        const SYMBOL        = 1 << 7;
        const NEW_LINE      = 1 << 8;
        const DATA_LINK     = 1 << 9;

        /// Binary literal (`0b1010`), when extended number types are on.
        const BINARY      = (1 << 10) | Self::NUMBER.bits();
        /// Octal literal (`0o777`), when extended number types are on.
        const OCTAL       = (1 << 11) | Self::NUMBER.bits();
        /// Hexadecimal literal (`0xFF`), when extended number types are on.
        const HEXADECIMAL = (1 << 12) | Self::NUMBER.bits();
        /// Plain decimal integer, when extended number types are on.
        const INTEGER     = (1 << 13) | Self::NUMBER.bits();
        /// Scientific notation (`1e9`), when extended number types are on.
        const SCIENTIFIC  = (1 << 14) | Self::NUMBER.bits();
        /// Decimal fraction (`3.14`), when extended number types are on.
        const FLOAT       = (1 << 15) | Self::NUMBER.bits();

        /// Reserved sentinel: the zero-length terminal token at
        /// end-of-input, and the pre-scan state of a deferred cursor.
        /// Never produced for a real span of text.
        const NONE = 1 << 18;

        const ALPHA_NUMERIC = Self::IDENTIFIER.bits() | Self::NUMBER.bits();
        const WHITE_SPACE_NEW_LINE = Self::WHITE_SPACE.bits() | Self::NEW_LINE.bits();
    }
}

impl TokenType {
    /// Short human-readable label for the token's primary class, used in
    /// error messages and debug output.
    pub fn label(self) -> &'static str {
        if self.intersects(TokenType::NONE) {
            "end-of-input"
        } else if self.intersects(TokenType::NUMBER) {
            "number"
        } else if self.intersects(TokenType::IDENTIFIER) {
            "identifier"
        } else if self.intersects(TokenType::STRING) {
            "string"
        } else if self.intersects(TokenType::NEW_LINE) {
            "new-line"
        } else if self.intersects(TokenType::WHITE_SPACE) {
            "white-space"
        } else if self.intersects(TokenType::OPEN_BRACKET) {
            "open-bracket"
        } else if self.intersects(TokenType::CLOSE_BRACKET) {
            "close-bracket"
        } else if self.intersects(TokenType::OPERATOR) {
            "operator"
        } else if self.intersects(TokenType::DATA_LINK) {
            "data-link"
        } else {
            "symbol"
        }
    }
}

#[cfg(test)]
mod tests;
