//! Ordered patches of a single multi-level cell.

use std::slice::Iter;

use super::patch::VerticalExtent;

/// Patches of one cell, kept in ascending `PartialOrd` order of the patch type.
///
/// Equal patches are all kept; a newly inserted patch goes after existing
/// equal ones. Whether patches may overlap is up to the patch type.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelList<P> {
    levels: Vec<P>,
}

impl<P> LevelList<P> {
    /// Empty list
    pub const fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Number of patches.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if the cell holds no patch.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Patches in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, P> {
        self.levels.iter()
    }

    /// Patches as an ordered slice.
    #[inline]
    pub fn as_slice(&self) -> &[P] {
        &self.levels
    }

    /// Patch at a position in the order.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&P> {
        self.levels.get(position)
    }

    /// Lowest patch in the order.
    #[inline]
    pub fn first(&self) -> Option<&P> {
        self.levels.first()
    }

    /// Highest patch in the order.
    #[inline]
    pub fn last(&self) -> Option<&P> {
        self.levels.last()
    }

    /// Remove the patch at `position`.
    pub fn remove(&mut self, position: usize) -> Option<P> {
        (position < self.levels.len()).then(|| self.levels.remove(position))
    }

    /// Keep only the patches matching `keep`. Order is preserved.
    pub fn retain<F: FnMut(&P) -> bool>(&mut self, keep: F) {
        self.levels.retain(keep);
    }

    /// Remove every patch.
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Append a patch known to sort at or after the current last one.
    #[inline]
    pub(crate) fn push_ordered(&mut self, patch: P) {
        self.levels.push(patch);
    }
}

impl<P: PartialOrd> LevelList<P> {
    /// Insert keeping the order. Returns the position of the new patch.
    pub fn insert(&mut self, patch: P) -> usize {
        let position = self.levels.partition_point(|p| p <= &patch);
        self.levels.insert(position, patch);
        position
    }
}

impl<P: VerticalExtent> LevelList<P> {
    /// Patches whose extent overlaps `[lo, hi]` (closed intervals).
    pub fn overlapping(&self, lo: f64, hi: f64) -> impl Iterator<Item = &P> + '_ {
        self.levels.iter().filter(move |p| p.overlaps_z(lo, hi))
    }
}

impl<P> Default for LevelList<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PartialOrd> FromIterator<P> for LevelList<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<P: PartialOrd> Extend<P> for LevelList<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for patch in iter {
            self.insert(patch);
        }
    }
}

impl<'a, P> IntoIterator for &'a LevelList<P> {
    type Item = &'a P;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

impl<P> IntoIterator for LevelList<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multilevel::HeightPatch;

    #[test]
    fn test_insert_keeps_order() {
        let mut list = LevelList::new();
        list.insert(HeightPatch::new(2.0, 3.0));
        list.insert(HeightPatch::new(0.0, 1.0));
        assert_eq!(list.insert(HeightPatch::new(1.0, 1.5)), 1);

        let mins: Vec<f64> = list.iter().map(|p| p.min).collect();
        assert_eq!(mins, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_equal_patches_kept_in_insertion_order() {
        let mut list = LevelList::new();
        list.insert((1, 'a'));
        list.insert((0, 'x'));
        list.insert((1, 'a'));
        assert_eq!(list.len(), 3);
        assert_eq!(list.as_slice(), &[(0, 'x'), (1, 'a'), (1, 'a')]);
    }

    #[test]
    fn test_remove_and_retain() {
        let mut list: LevelList<i32> = [5, 1, 3, 2].into_iter().collect();
        assert_eq!(list.as_slice(), &[1, 2, 3, 5]);
        assert_eq!(list.remove(0), Some(1));
        assert_eq!(list.remove(10), None);
        list.retain(|&p| p != 3);
        assert_eq!(list.as_slice(), &[2, 5]);
        assert_eq!(list.first(), Some(&2));
        assert_eq!(list.last(), Some(&5));
    }

    #[test]
    fn test_overlapping() {
        let list: LevelList<HeightPatch> = [
            HeightPatch::new(0.0, 1.0),
            HeightPatch::new(2.0, 3.0),
            HeightPatch::new(4.0, 5.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(list.overlapping(1.0, 2.0).count(), 2);
        assert_eq!(list.overlapping(3.1, 3.9).count(), 0);
    }

    #[test]
    fn test_default_is_empty() {
        let list: LevelList<HeightPatch> = LevelList::default();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
    }
}
