//! A [`TermIndex`] is a bidirectional association of [nodes](`Node`) with short numeric indices.
use entail_api::term::Node;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// The index standing for the default graph in the context position of a quad.
/// It is never associated to a node.
pub const DEFAULT_GRAPH: u32 = 0;

/// A bidirectional association of [nodes](`Node`) with `u32` indices.
///
/// Indices start at 1, [`DEFAULT_GRAPH`] being reserved.
/// Nodes are never removed from the index.
#[derive(Clone, Debug, Default)]
pub struct TermIndex {
    t2i: HashMap<Node, u32>,
    i2t: Vec<Node>,
}

impl TermIndex {
    /// Build an empty index.
    pub fn new() -> Self {
        TermIndex {
            t2i: HashMap::new(),
            i2t: vec![],
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether no node is indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the index corresponding to node `t`, if it exists.
    pub fn get_index(&self, t: &Node) -> Option<u32> {
        self.t2i.get(t).copied()
    }

    /// Get the index corresponding to node `t`, adding it in the index if necessary.
    ///
    /// Returns `None` if the index is full.
    pub fn ensure_index(&mut self, t: &Node) -> Option<u32> {
        if let Some(i) = self.t2i.get(t) {
            return Some(*i);
        }
        let i = u32::try_from(self.i2t.len() + 1).ok()?;
        match self.t2i.entry(t.clone()) {
            Entry::Vacant(e) => {
                e.insert(i);
                self.i2t.push(t.clone());
                Some(i)
            }
            Entry::Occupied(e) => Some(*e.get()),
        }
    }

    /// Get the node corresponding to index `i`.
    ///
    /// # Precondition
    /// `i` must have been returned previously by [`get_index`](TermIndex::get_index) or [`ensure_index`](TermIndex::ensure_index),
    /// otherwise this method may panic.
    pub fn get_term(&self, i: u32) -> &Node {
        &self.i2t[i as usize - 1]
    }
}
