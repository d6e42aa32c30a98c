use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::hypothesis::Hypothesis;
use crate::tracking::domain::tracklet::{Fate, TrackletId};
use crate::tracking::domain::tracklet_store::TrackletStore;

use super::hypothesis_index::HypothesisIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkHypothesis {
    pub source: TrackletId,
    pub target: TrackletId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivisionHypothesis {
    pub source: TrackletId,
    pub child_a: TrackletId,
    pub child_b: TrackletId,
}

/// Result of splitting one pass's hypotheses by kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub links: HypothesisIndex<LinkHypothesis>,
    pub divisions: HypothesisIndex<DivisionHypothesis>,
    /// One `(source, fate)` per hypothesis, in input order. Later entries
    /// for the same source overwrite earlier ones when applied.
    pub fates: Vec<(TrackletId, Fate)>,
}

impl Classification {
    /// Stamp each source tracklet with the fate of its accepted hypothesis.
    pub fn apply_fates(&self, store: &mut TrackletStore) -> Result<(), ReconcileError> {
        for &(id, fate) in &self.fates {
            store.tracklet_mut(id)?.set_fate(fate);
        }
        Ok(())
    }
}

/// Routes link and division hypotheses into per-source indices.
///
/// Merge hypotheses only contribute a fate. The classifier never touches
/// the store, so a pass can reject its input before anything is mutated.
pub struct HypothesisClassifier;

impl HypothesisClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(
        &self,
        hypotheses: &[Hypothesis],
        capacity: usize,
    ) -> Result<Classification, ReconcileError> {
        let mut links = HypothesisIndex::with_capacity(capacity);
        let mut divisions = HypothesisIndex::with_capacity(capacity);
        let mut fates = Vec::with_capacity(hypotheses.len());

        for hypothesis in hypotheses {
            fates.push((hypothesis.source(), hypothesis.fate()));

            match *hypothesis {
                Hypothesis::Link {
                    source,
                    target,
                    probability,
                } => {
                    log::debug!("P_link: {source}->{target} [Score: {probability}]");
                    if links.contains(source) {
                        log::warn!("Duplicate link hypothesis for tracklet {source} ignored");
                    }
                    links.push(source, LinkHypothesis { source, target })?;
                }
                Hypothesis::Divide {
                    source,
                    child_a,
                    child_b,
                    probability,
                } => {
                    log::debug!(
                        "P_branch: {source}->{{{child_a}, {child_b}}} [Score: {probability}]"
                    );
                    if divisions.contains(source) {
                        log::warn!("Duplicate division hypothesis for tracklet {source} ignored");
                    }
                    divisions.push(
                        source,
                        DivisionHypothesis {
                            source,
                            child_a,
                            child_b,
                        },
                    )?;
                }
                Hypothesis::Merge { .. } => {}
            }
        }

        Ok(Classification {
            links,
            divisions,
            fates,
        })
    }
}

impl Default for HypothesisClassifier {
    fn default() -> Self {
        Self::new()
    }
}
