use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::tracklet::{Fate, TrackletId};
use crate::tracking::domain::tracklet_store::TrackletStore;

use super::hypothesis_classifier::DivisionHypothesis;
use super::hypothesis_index::HypothesisIndex;
use super::reconcile_observer::ReconcileObserver;

/// A division as recorded in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Branch {
    pub source: TrackletId,
    /// The source after renames: the chain head that absorbed it, or the
    /// source itself.
    pub parent: TrackletId,
    pub children: [TrackletId; 2],
}

/// Applies division hypotheses once every join is done.
///
/// Must run after chain merging (parents are resolved through renames)
/// and before absorbed tracklets are erased.
pub struct LineageAnnotator;

impl LineageAnnotator {
    pub fn new() -> Self {
        Self
    }

    pub fn annotate(
        &self,
        store: &mut TrackletStore,
        divisions: &HypothesisIndex<DivisionHypothesis>,
        observer: &mut dyn ReconcileObserver,
    ) -> Result<Vec<Branch>, ReconcileError> {
        let mut branches = Vec::with_capacity(divisions.len());
        for (_, division) in divisions.iter() {
            let branch = branch(store, division)?;
            observer.branched(branch.source, branch.parent, branch.children);
            branches.push(branch);
        }
        Ok(branches)
    }
}

impl Default for LineageAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

fn branch(
    store: &mut TrackletStore,
    division: &DivisionHypothesis,
) -> Result<Branch, ReconcileError> {
    let DivisionHypothesis {
        source,
        child_a,
        child_b,
    } = *division;

    let parent = store
        .resolve(source)
        .ok_or(ReconcileError::UnknownTracklet(source))?;
    if parent != source {
        log::debug!("Branch: {source} (renamed: {parent}) {{{child_a}, {child_b}}}");
    } else {
        log::debug!("Branch: {source} {{{child_a}, {child_b}}}");
    }

    for child in [child_a, child_b] {
        store.tracklet_mut(child)?.set_parent(parent);
    }
    let head = store.tracklet_mut(parent)?;
    head.add_child(child_a);
    head.add_child(child_b);
    store.tracklet_mut(source)?.set_fate(Fate::Divided);

    Ok(Branch {
        source,
        parent,
        children: [child_a, child_b],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::domain::chain_merger::join;
    use crate::reconciliation::domain::reconcile_observer::NullReconcileObserver;
    use crate::tracking::domain::observation::Observation;
    use crate::tracking::domain::tracklet::Tracklet;

    fn store(ids: &[TrackletId]) -> TrackletStore {
        TrackletStore::from_tracklets(
            ids.iter()
                .map(|&id| Tracklet::new(id, vec![Observation::new(id as i64, id)])),
        )
        .unwrap()
    }

    fn divisions(
        entries: &[(TrackletId, TrackletId, TrackletId)],
    ) -> HypothesisIndex<DivisionHypothesis> {
        let mut index = HypothesisIndex::with_capacity(16);
        for &(source, child_a, child_b) in entries {
            index
                .push(
                    source,
                    DivisionHypothesis {
                        source,
                        child_a,
                        child_b,
                    },
                )
                .unwrap();
        }
        index
    }

    fn annotate(
        s: &mut TrackletStore,
        entries: &[(TrackletId, TrackletId, TrackletId)],
    ) -> Vec<Branch> {
        LineageAnnotator::new()
            .annotate(s, &divisions(entries), &mut NullReconcileObserver)
            .unwrap()
    }

    #[test]
    fn test_division_sets_parent_on_both_children() {
        let mut s = store(&[5, 6, 7]);
        let branches = annotate(&mut s, &[(5, 6, 7)]);

        assert_eq!(s.get(6).unwrap().parent(), Some(5));
        assert_eq!(s.get(7).unwrap().parent(), Some(5));
        assert_eq!(s.get(5).unwrap().fate(), Fate::Divided);
        assert_eq!(s.get(5).unwrap().children(), &[6, 7]);
        assert_eq!(
            branches,
            vec![Branch {
                source: 5,
                parent: 5,
                children: [6, 7]
            }]
        );
    }

    #[test]
    fn test_division_does_not_mark_removal() {
        let mut s = store(&[5, 6, 7]);
        annotate(&mut s, &[(5, 6, 7)]);
        assert!(s.iter().all(|t| !t.is_marked_for_removal()));
    }

    #[test]
    fn test_absorbed_source_resolves_to_head() {
        let mut s = store(&[1, 2, 3, 4]);
        join(&mut s, 1, 2).unwrap();
        let branches = annotate(&mut s, &[(2, 3, 4)]);

        assert_eq!(s.get(3).unwrap().parent(), Some(1));
        assert_eq!(s.get(4).unwrap().parent(), Some(1));
        assert_eq!(s.get(1).unwrap().children(), &[3, 4]);
        assert_eq!(branches[0].parent, 1);
        assert_eq!(branches[0].source, 2);
    }

    #[test]
    fn test_absorbed_source_fate_still_set() {
        let mut s = store(&[1, 2, 3, 4]);
        join(&mut s, 1, 2).unwrap();
        annotate(&mut s, &[(2, 3, 4)]);
        assert_eq!(s.get(2).unwrap().fate(), Fate::Divided);
    }

    #[test]
    fn test_multiple_divisions_build_tree() {
        let mut s = store(&[1, 2, 3, 4, 5]);
        annotate(&mut s, &[(1, 2, 3), (2, 4, 5)]);
        assert_eq!(s.lineage(1), vec![1, 2, 4, 5, 3]);
    }

    #[test]
    fn test_unknown_child_is_error() {
        let mut s = store(&[5, 6]);
        let result = LineageAnnotator::new().annotate(
            &mut s,
            &divisions(&[(5, 6, 9)]),
            &mut NullReconcileObserver,
        );
        assert_eq!(result, Err(ReconcileError::UnknownTracklet(9)));
    }

    #[test]
    fn test_no_divisions() {
        let mut s = store(&[1]);
        assert!(annotate(&mut s, &[]).is_empty());
        assert_eq!(s.get(1).unwrap().fate(), Fate::Pending);
    }
}
