use pretty_assertions::assert_eq;

use super::TokenType;

#[test]
fn tags_are_disjoint_powers_of_two() {
    let tags = [
        TokenType::NUMBER,
        TokenType::IDENTIFIER,
        TokenType::STRING,
        TokenType::WHITE_SPACE,
        TokenType::OPEN_BRACKET,
        TokenType::CLOSE_BRACKET,
        TokenType::OPERATOR,
        TokenType::SYMBOL,
        TokenType::NEW_LINE,
        TokenType::DATA_LINK,
        TokenType::NONE,
    ];
    for (i, a) in tags.iter().enumerate() {
        assert!(a.bits().is_power_of_two(), "{a:?}");
        for b in &tags[i + 1..] {
            assert!(!a.intersects(*b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn extended_number_kinds_include_the_number_tag() {
    for kind in [
        TokenType::BINARY,
        TokenType::OCTAL,
        TokenType::HEXADECIMAL,
        TokenType::INTEGER,
        TokenType::SCIENTIFIC,
        TokenType::FLOAT,
    ] {
        assert!(kind.intersects(TokenType::NUMBER), "{kind:?}");
        assert!(kind.contains(TokenType::NUMBER), "{kind:?}");
    }
    assert_ne!(TokenType::BINARY, TokenType::OCTAL);
    assert_ne!(TokenType::FLOAT, TokenType::SCIENTIFIC);
}

#[test]
fn composites_cover_their_parts() {
    assert!(TokenType::ALPHA_NUMERIC.contains(TokenType::IDENTIFIER));
    assert!(TokenType::ALPHA_NUMERIC.contains(TokenType::NUMBER));
    assert!(TokenType::WHITE_SPACE_NEW_LINE.contains(TokenType::WHITE_SPACE));
    assert!(TokenType::WHITE_SPACE_NEW_LINE.contains(TokenType::NEW_LINE));
    assert!(!TokenType::WHITE_SPACE_NEW_LINE.intersects(TokenType::SYMBOL));
}

#[test]
fn labels_name_the_primary_class() {
    assert_eq!(TokenType::IDENTIFIER.label(), "identifier");
    assert_eq!(TokenType::HEXADECIMAL.label(), "number");
    assert_eq!(TokenType::NONE.label(), "end-of-input");
    assert_eq!(TokenType::SYMBOL.label(), "symbol");
}
