//! Disjoint-set partition of grid cells.
//!
//! Classes are created lazily: the first [`Partition::find`] of an element puts it in a
//! fresh singleton class, so no initialization pass over the grid is needed.

use std::{collections::HashMap, hash::Hash};

/// Handle of an equivalence class, as returned by [`Partition::find`].
///
/// Handles are only comparable while no union touches their classes; take a fresh
/// [`Partition::find`] after merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

/// Union-find over arbitrary hashable elements, with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct Partition<T> {
    index: HashMap<T, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<T> Default for Partition<T>
where
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Partition<T>
where
    T: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Partition {
            index: HashMap::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    /// Returns the class containing `item`, creating a singleton class on first use.
    pub fn find(&mut self, item: T) -> ClassId {
        let node = self.node(item);
        ClassId(self.root(node))
    }

    /// Merges the classes `a` and `b`.
    ///
    /// Returns `false` if they were already the same class.
    pub fn union(&mut self, a: ClassId, b: ClassId) -> bool {
        let root_a = self.root(a.0);
        let root_b = self.root(b.0);

        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    /// Whether `a` and `b` are currently in the same class.
    #[cfg(test)]
    pub fn same_class(&mut self, a: T, b: T) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of elements referenced so far.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Number of distinct classes among the referenced elements.
    pub fn class_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(node, &parent)| node == parent)
            .count()
    }

    fn node(&mut self, item: T) -> usize {
        if let Some(&node) = self.index.get(&item) {
            return node;
        }
        let node = self.parent.len();
        self.parent.push(node);
        self.rank.push(0);
        self.index.insert(item, node);
        node
    }

    fn root(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            let grandparent = self.parent[self.parent[node]];
            self.parent[node] = grandparent;
            node = grandparent;
        }
        node
    }
}
