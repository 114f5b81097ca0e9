//! Player selection - up to two sector indices, oldest first.

use serde::{Deserialize, Serialize};

/// Maximum number of simultaneously selected sectors.
pub const MAX_SELECTED: usize = 2;

/// Insertion-ordered selection of at most [`MAX_SELECTED`] indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection by toggling each index in turn.
    pub fn from_indices(indices: &[usize]) -> Self {
        let mut selection = Self::new();
        for &i in indices {
            selection.toggle(i);
        }
        selection
    }

    /// Toggle `index`.
    ///
    /// An already-selected index is removed. Otherwise it is appended, and if
    /// that would exceed the limit the oldest entry is evicted. Returns
    /// whether `index` is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if let Some(pos) = self.indices.iter().position(|&i| i == index) {
            self.indices.remove(pos);
            return false;
        }
        if self.indices.len() == MAX_SELECTED {
            self.indices.remove(0);
        }
        self.indices.push(index);
        true
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Oldest selected index. Anchor-requiring transforms use this one.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Both indices when exactly two are selected.
    pub fn pair(&self) -> Option<(usize, usize)> {
        match self.indices.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut sel = Selection::new();
        assert!(sel.toggle(4));
        assert_eq!(sel.as_slice(), &[4]);
        assert!(!sel.toggle(4));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_third_selection_evicts_oldest() {
        let mut sel = Selection::new();
        sel.toggle(1);
        sel.toggle(2);
        sel.toggle(3);
        assert_eq!(sel.as_slice(), &[2, 3]);
        assert_eq!(sel.first(), Some(2));
        assert_eq!(sel.pair(), Some((2, 3)));
    }

    #[test]
    fn test_toggle_off_keeps_order() {
        let mut sel = Selection::from_indices(&[5, 9]);
        sel.toggle(5);
        assert_eq!(sel.as_slice(), &[9]);
        assert_eq!(sel.pair(), None);
        sel.toggle(5);
        assert_eq!(sel.as_slice(), &[9, 5]);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let mut sel = Selection::new();
        for i in 0..10 {
            sel.toggle(i);
            assert!(sel.len() <= MAX_SELECTED);
        }
        assert_eq!(sel.as_slice(), &[8, 9]);
    }
}
