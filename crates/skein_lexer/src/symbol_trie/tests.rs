use pretty_assertions::assert_eq;

use super::SymbolTrie;

#[test]
fn single_symbol_matches_at_start() {
    let mut trie = SymbolTrie::new();
    trie.insert("->");
    assert_eq!(trie.match_at("-> x"), Some(2));
    assert_eq!(trie.match_at("->"), Some(2));
}

#[test]
fn no_match_when_input_differs() {
    let mut trie = SymbolTrie::new();
    trie.insert("->");
    assert_eq!(trie.match_at("- >"), None);
    assert_eq!(trie.match_at("x->"), None);
    assert_eq!(trie.match_at(""), None);
}

#[test]
fn longer_registration_wins() {
    let mut trie = SymbolTrie::new();
    trie.insert("=");
    trie.insert("==");
    assert_eq!(trie.match_at("==x"), Some(2));
    assert_eq!(trie.match_at("=x"), Some(1));
}

#[test]
fn walk_does_not_back_up_to_a_shorter_prefix() {
    // Only "=" and "===" registered: an input of "==" walks to the
    // incomplete "==" node and reports no match.
    let mut trie = SymbolTrie::new();
    trie.insert("=");
    trie.insert("===");
    assert_eq!(trie.match_at("==x"), None);
    assert_eq!(trie.match_at("===x"), Some(3));
    assert_eq!(trie.match_at("=x"), Some(1));
}

#[test]
fn shared_prefixes_share_nodes() {
    let mut trie = SymbolTrie::new();
    trie.insert("<=");
    trie.insert("<=>");
    // root, '<', '=', '>'
    assert_eq!(trie.node_count(), 4);
    assert_eq!(trie.match_at("<=>"), Some(3));
    assert_eq!(trie.match_at("<= "), Some(2));
}

#[test]
fn reinserting_is_idempotent() {
    let mut trie = SymbolTrie::new();
    trie.insert("::");
    trie.insert("::");
    assert_eq!(trie.node_count(), 3);
    assert_eq!(trie.match_at("::"), Some(2));
}

#[test]
fn multibyte_symbols_report_byte_lengths() {
    let mut trie = SymbolTrie::new();
    trie.insert("≤≥");
    assert_eq!(trie.match_at("≤≥!"), Some(6));
}

#[test]
fn empty_registration_marks_the_root() {
    let mut trie = SymbolTrie::new();
    trie.insert("");
    assert_eq!(trie.match_at("anything"), Some(0));
}
