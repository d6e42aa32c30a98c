use std::collections::BTreeMap;

use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::tracklet::TrackletId;

/// Hypotheses bucketed by source tracklet.
///
/// Only identifiers that carry a hypothesis take up space, so a sparse id
/// range costs nothing. `capacity` bounds the identifiers accepted. Every
/// entry pushed for a key is kept, in arrival order; consumers act on the
/// first one.
#[derive(Clone, Debug, PartialEq)]
pub struct HypothesisIndex<T> {
    capacity: usize,
    entries: BTreeMap<TrackletId, Vec<T>>,
}

impl<T> HypothesisIndex<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record `entry` under `id`. Fails if `id` lies outside the capacity.
    pub fn push(&mut self, id: TrackletId, entry: T) -> Result<(), ReconcileError> {
        if id as usize >= self.capacity {
            return Err(ReconcileError::IndexOutOfRange {
                id,
                capacity: self.capacity,
            });
        }
        self.entries.entry(id).or_default().push(entry);
        Ok(())
    }

    pub fn get(&self, id: TrackletId) -> &[T] {
        self.entries
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self, id: TrackletId) -> Option<&T> {
        self.get(id).first()
    }

    pub fn contains(&self, id: TrackletId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of identifiers with at least one entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, first entry)` pairs in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackletId, &T)> {
        self.entries
            .iter()
            .filter_map(|(&id, entries)| entries.first().map(|e| (id, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index: HypothesisIndex<u8> = HypothesisIndex::with_capacity(4);
        assert_eq!(index.capacity(), 4);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.first(2).is_none());
    }

    #[test]
    fn test_push_and_first() {
        let mut index = HypothesisIndex::with_capacity(4);
        index.push(2, 'a').unwrap();
        assert!(index.contains(2));
        assert_eq!(index.first(2), Some(&'a'));
        assert!(!index.contains(1));
    }

    #[test]
    fn test_duplicates_are_kept_and_first_wins() {
        let mut index = HypothesisIndex::with_capacity(3);
        index.push(1, 'a').unwrap();
        index.push(1, 'b').unwrap();
        assert_eq!(index.get(1), &['a', 'b']);
        assert_eq!(index.first(1), Some(&'a'));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_push_beyond_capacity_is_error() {
        let mut index = HypothesisIndex::with_capacity(2);
        assert_eq!(
            index.push(2, 'x'),
            Err(ReconcileError::IndexOutOfRange { id: 2, capacity: 2 })
        );
    }

    #[test]
    fn test_lookup_beyond_capacity_is_empty() {
        let index: HypothesisIndex<u8> = HypothesisIndex::with_capacity(2);
        assert!(index.get(10).is_empty());
    }

    #[test]
    fn test_iter_ascending_first_entries() {
        let mut index = HypothesisIndex::with_capacity(6);
        index.push(4, 'd').unwrap();
        index.push(1, 'a').unwrap();
        index.push(1, 'z').unwrap();
        let items: Vec<(TrackletId, char)> = index.iter().map(|(id, c)| (id, *c)).collect();
        assert_eq!(items, vec![(1, 'a'), (4, 'd')]);
    }

    #[test]
    fn test_sparse_ids_at_top_of_range() {
        let mut index = HypothesisIndex::with_capacity(u32::MAX as usize + 1);
        index.push(u32::MAX, 'z').unwrap();
        index.push(0, 'a').unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.first(u32::MAX), Some(&'z'));
        let ids: Vec<TrackletId> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, u32::MAX]);
    }
}
