//! Custom multi-character symbol registry.
//!
//! Callers can register literal symbols (`"=="`, `"->"`, `"<=>"`) that
//! take priority over generic classification. Registered symbols live in
//! a rooted trie: one node per prefix, one edge per character, with a
//! `complete` flag on nodes that end a registered symbol.
//!
//! Matching walks the trie as far as edges exist and accepts only when
//! the final node is complete. Registering `"=="` alongside `"="` makes
//! the walk prefer `"=="` whenever both characters are present. The walk
//! never backtracks to a shorter completed prefix; this is the documented
//! longest-match contract.
//!
//! The registry is append-only. Nodes are arena-allocated in a `Vec` and
//! edges are kept sorted for binary search, so the structure is a plain
//! rooted tree with no interior pointers.

/// Index of the root node in the arena.
const ROOT: usize = 0;

#[derive(Clone, Debug, Default)]
struct Node {
    /// Outgoing edges, sorted by character.
    edges: Vec<(char, usize)>,
    /// A registered symbol ends at this node.
    complete: bool,
}

/// Arena-allocated symbol trie.
#[derive(Clone, Debug)]
pub struct SymbolTrie {
    nodes: Vec<Node>,
}

impl SymbolTrie {
    /// An empty registry (a lone, incomplete root).
    pub fn new() -> SymbolTrie {
        SymbolTrie {
            nodes: vec![Node::default()],
        }
    }

    /// Register `symbol`, creating one node per new prefix.
    ///
    /// Registering the empty string marks the root complete; the scan
    /// engine ignores such zero-length matches.
    pub fn insert(&mut self, symbol: &str) {
        let mut node = ROOT;
        for ch in symbol.chars() {
            node = match self.nodes[node].edges.binary_search_by_key(&ch, |&(c, _)| c) {
                Ok(i) => self.nodes[node].edges[i].1,
                Err(i) => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].edges.insert(i, (ch, next));
                    next
                }
            };
        }
        self.nodes[node].complete = true;
    }

    /// Match a registered symbol at the start of `input`.
    ///
    /// Walks edges for as long as they exist and returns the byte length
    /// of the walked span when the final node is complete, `None`
    /// otherwise. A walk that overshoots a completed prefix does not
    /// back up to it.
    pub fn match_at(&self, input: &str) -> Option<usize> {
        let mut node = ROOT;
        let mut consumed = 0;
        for (idx, ch) in input.char_indices() {
            match self.nodes[node].edges.binary_search_by_key(&ch, |&(c, _)| c) {
                Ok(i) => {
                    node = self.nodes[node].edges[i].1;
                    consumed = idx + ch.len_utf8();
                }
                Err(_) => break,
            }
        }
        self.nodes[node].complete.then_some(consumed)
    }

    /// Number of nodes in the arena, root included.
    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for SymbolTrie {
    fn default() -> SymbolTrie {
        SymbolTrie::new()
    }
}

#[cfg(test)]
mod tests;
