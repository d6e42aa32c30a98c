use crate::tracking::domain::tracklet::TrackletId;

use super::finalizer::FinalizeReport;

/// Observer for reconciliation events.
///
/// Lets callers trace what a pass did (stdout, log crate, test recorder)
/// without changing how the pass runs. Every method is a notification;
/// none of them can influence control flow.
pub trait ReconcileObserver: Send {
    /// A pass is about to mutate the store.
    fn pass_started(&mut self, _tracklets: usize, _hypotheses: usize) {}

    /// A new link chain begins at `head`.
    fn chain_started(&mut self, head: TrackletId);

    /// `absorbed` was appended onto `head`.
    fn joined(&mut self, head: TrackletId, absorbed: TrackletId);

    /// The chain at `head` is complete. `length` counts the head.
    fn chain_finished(&mut self, head: TrackletId, length: usize);

    /// A division of `source` was recorded under `parent` (the renamed
    /// source, or the source itself).
    fn branched(&mut self, source: TrackletId, parent: TrackletId, children: [TrackletId; 2]);

    /// Absorbed tracklets were erased.
    fn removed(&mut self, before: usize, after: usize);

    /// Placeholders were trimmed and numbered.
    fn finalized(&mut self, report: &FinalizeReport);

    /// Emit an end-of-pass summary. Default: no-op.
    fn summary(&self) {}
}

/// Observer that discards all events.
pub struct NullReconcileObserver;

impl ReconcileObserver for NullReconcileObserver {
    fn chain_started(&mut self, _head: TrackletId) {}
    fn joined(&mut self, _head: TrackletId, _absorbed: TrackletId) {}
    fn chain_finished(&mut self, _head: TrackletId, _length: usize) {}
    fn branched(&mut self, _source: TrackletId, _parent: TrackletId, _children: [TrackletId; 2]) {
    }
    fn removed(&mut self, _before: usize, _after: usize) {}
    fn finalized(&mut self, _report: &FinalizeReport) {}
}
