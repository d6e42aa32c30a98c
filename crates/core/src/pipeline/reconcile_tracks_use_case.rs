use crate::reconciliation::domain::chain_merger::{Chain, ChainMerger};
use crate::reconciliation::domain::finalizer::{FinalizeReport, Finalizer};
use crate::reconciliation::domain::hypothesis_classifier::HypothesisClassifier;
use crate::reconciliation::domain::lineage_annotator::{Branch, LineageAnnotator};
use crate::reconciliation::domain::reconcile_observer::{
    NullReconcileObserver, ReconcileObserver,
};
use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::hypothesis::Hypothesis;
use crate::tracking::domain::tracklet_store::TrackletStore;

use super::reconcile_config::ReconcileConfig;

/// What a reconciliation pass changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    pub chains: Vec<Chain>,
    pub branches: Vec<Branch>,
    pub removed: usize,
    /// `None` when the pass was a no-op and finalization did not run.
    pub finalize: Option<FinalizeReport>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.finalize.is_none()
    }
}

/// Rebuilds the track set from one resolved hypothesis list.
///
/// Stages run in a fixed order: classify, merge chains, annotate lineage,
/// erase absorbed tracklets, finalize. All precondition checks happen
/// before the first stage that mutates the store, so an `Err` leaves the
/// store exactly as it was.
pub struct ReconcileTracksUseCase {
    classifier: HypothesisClassifier,
    merger: ChainMerger,
    annotator: LineageAnnotator,
    finalizer: Finalizer,
    observer: Box<dyn ReconcileObserver>,
}

impl ReconcileTracksUseCase {
    pub fn new(config: ReconcileConfig, observer: Option<Box<dyn ReconcileObserver>>) -> Self {
        Self {
            classifier: HypothesisClassifier::new(),
            merger: ChainMerger::new(config.cycle_policy),
            annotator: LineageAnnotator::new(),
            finalizer: Finalizer::new(),
            observer: observer.unwrap_or_else(|| Box::new(NullReconcileObserver)),
        }
    }

    pub fn execute(
        &mut self,
        store: &mut TrackletStore,
        hypotheses: &[Hypothesis],
    ) -> Result<ReconcileReport, ReconcileError> {
        if hypotheses.is_empty() {
            log::debug!("Hypothesis list is empty");
            return Ok(ReconcileReport::default());
        }
        if store.is_empty() {
            log::debug!("Tracklet store is empty");
            return Ok(ReconcileReport::default());
        }

        validate_references(store, hypotheses)?;

        let classification = self.classifier.classify(hypotheses, store.id_space())?;
        let chains = self.merger.plan(&classification.links)?;

        self.observer.pass_started(store.len(), hypotheses.len());
        classification.apply_fates(store)?;
        self.merger.apply(store, &chains, self.observer.as_mut())?;
        let branches =
            self.annotator
                .annotate(store, &classification.divisions, self.observer.as_mut())?;

        let before = store.len();
        let removed = store.remove_absorbed();
        self.observer.removed(before, store.len());

        let finalize = self.finalizer.finalize(store);
        self.observer.finalized(&finalize);
        self.observer.summary();

        Ok(ReconcileReport {
            chains,
            branches,
            removed,
            finalize: Some(finalize),
        })
    }
}

impl Default for ReconcileTracksUseCase {
    fn default() -> Self {
        Self::new(ReconcileConfig::default(), None)
    }
}

fn validate_references(
    store: &TrackletStore,
    hypotheses: &[Hypothesis],
) -> Result<(), ReconcileError> {
    for hypothesis in hypotheses {
        if let Some(id) = hypothesis
            .tracklet_ids()
            .into_iter()
            .find(|&id| !store.contains(id))
        {
            return Err(ReconcileError::UnknownTracklet(id));
        }
    }
    Ok(())
}
