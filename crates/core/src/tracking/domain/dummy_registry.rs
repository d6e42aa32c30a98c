use crate::shared::reconcile_error::ReconcileError;

use super::tracklet::TrackletId;

/// Where a finalized placeholder lives inside the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DummyLocator {
    pub tracklet: TrackletId,
    pub position: usize,
}

/// Placeholders in the order their negative identifiers were assigned.
///
/// Entry `n` belongs to identifier `-(n + 1)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DummyRegistry {
    entries: Vec<DummyLocator>,
}

impl DummyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn push(&mut self, locator: DummyLocator) {
        self.entries.push(locator);
    }

    /// Map a negative identifier back to its registry entry.
    pub fn locate(&self, id: i64) -> Result<DummyLocator, ReconcileError> {
        if id >= 0 {
            return Err(ReconcileError::DummyIdNotNegative(id));
        }
        if self.entries.is_empty() {
            return Err(ReconcileError::EmptyDummyRegistry);
        }
        // -(id + 1) cannot overflow for any negative i64.
        let index = usize::try_from(-(id + 1)).unwrap_or(usize::MAX);
        self.entries
            .get(index)
            .copied()
            .ok_or(ReconcileError::DummyIdOutOfRange {
                id,
                count: self.entries.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn registry(n: usize) -> DummyRegistry {
        let mut r = DummyRegistry::new();
        for position in 0..n {
            r.push(DummyLocator {
                tracklet: 1,
                position,
            });
        }
        r
    }

    #[test]
    fn test_locate_maps_minus_one_to_first_entry() {
        let r = registry(3);
        assert_eq!(r.locate(-1).unwrap().position, 0);
        assert_eq!(r.locate(-3).unwrap().position, 2);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::positive(5)]
    fn test_locate_rejects_non_negative(#[case] id: i64) {
        assert_eq!(
            registry(2).locate(id),
            Err(ReconcileError::DummyIdNotNegative(id))
        );
    }

    #[test]
    fn test_locate_on_empty_registry() {
        assert_eq!(
            DummyRegistry::new().locate(-1),
            Err(ReconcileError::EmptyDummyRegistry)
        );
    }

    #[rstest]
    #[case::one_past_end(-3)]
    #[case::far_past_end(-100)]
    #[case::minimum(i64::MIN)]
    fn test_locate_out_of_range_never_wraps(#[case] id: i64) {
        assert_eq!(
            registry(2).locate(id),
            Err(ReconcileError::DummyIdOutOfRange { id, count: 2 })
        );
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut r = registry(2);
        r.clear();
        assert!(r.is_empty());
    }
}
