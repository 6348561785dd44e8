use std::{collections::HashMap, hash::Hash};

use rand::Rng;

/// A set supporting O(1) insert, remove and uniformly random pick.
///
/// Elements live in a dense vector; the index map only serves lookups, so iteration and
/// random picks depend solely on the sequence of operations and the RNG passed in.
#[derive(Debug, Clone)]
pub struct FrontierSet<T> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T> Default for FrontierSet<T>
where
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrontierSet<T>
where
    T: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        FrontierSet {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Returns `false` if `item` was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item, self.items.len());
        self.items.push(item);
        true
    }

    /// Returns `false` if `item` was not present.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(idx) = self.positions.remove(item) else {
            return false;
        };
        self.items.swap_remove(idx);
        if let Some(&moved) = self.items.get(idx) {
            self.positions.insert(moved, idx);
        }
        true
    }

    #[cfg(test)]
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Removes and returns a uniformly random element.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.items[rng.random_range(0..self.len())];
        self.remove(&item);
        Some(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
impl<T> FromIterator<T> for FrontierSet<T>
where
    T: Copy + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = FrontierSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}
