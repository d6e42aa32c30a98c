use std::time::Instant;

use crate::reconciliation::domain::finalizer::FinalizeReport;
use crate::reconciliation::domain::reconcile_observer::ReconcileObserver;
use crate::tracking::domain::tracklet::TrackletId;

/// Observer that traces each event through the `log` crate and keeps
/// per-pass totals for an end-of-pass summary.
///
/// Per-event lines go to `debug`, so they only show up when the caller
/// raises the log level. The summary goes to `info`.
pub struct LogReconcileObserver {
    start_time: Instant,
    tracklets: usize,
    hypotheses: usize,
    chains: usize,
    joins: usize,
    longest_chain: usize,
    branches: usize,
    removed: usize,
    finalize: Option<FinalizeReport>,
    current_chain: Vec<TrackletId>,
}

impl LogReconcileObserver {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            tracklets: 0,
            hypotheses: 0,
            chains: 0,
            joins: 0,
            longest_chain: 0,
            branches: 0,
            removed: 0,
            finalize: None,
            current_chain: Vec::new(),
        }
    }

    pub fn chains(&self) -> usize {
        self.chains
    }

    pub fn joins(&self) -> usize {
        self.joins
    }

    pub fn branches(&self) -> usize {
        self.branches
    }

    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Returns the formatted summary, or `None` if no pass has started.
    pub fn summary_string(&self) -> Option<String> {
        if self.tracklets == 0 && self.hypotheses == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Reconciliation summary ({} tracklets, {} hypotheses, {elapsed_ms:.1}ms):",
            self.tracklets, self.hypotheses
        )];
        lines.push(format!(
            "  chains: {} ({} joins, longest {})",
            self.chains, self.joins, self.longest_chain
        ));
        lines.push(format!("  branches: {}", self.branches));
        lines.push(format!("  removed: {}", self.removed));
        if let Some(report) = &self.finalize {
            lines.push(format!(
                "  dummies: {} numbered, {} trimmed",
                report.dummies, report.trimmed
            ));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LogReconcileObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconcileObserver for LogReconcileObserver {
    fn pass_started(&mut self, tracklets: usize, hypotheses: usize) {
        *self = Self {
            tracklets,
            hypotheses,
            ..Self::new()
        };
        log::debug!("Reconciling {hypotheses} hypotheses over {tracklets} tracklets");
    }

    fn chain_started(&mut self, head: TrackletId) {
        self.current_chain.clear();
        self.current_chain.push(head);
    }

    fn joined(&mut self, _head: TrackletId, absorbed: TrackletId) {
        self.current_chain.push(absorbed);
        self.joins += 1;
    }

    fn chain_finished(&mut self, head: TrackletId, length: usize) {
        self.chains += 1;
        self.longest_chain = self.longest_chain.max(length);
        let members: Vec<String> = self.current_chain.iter().map(|id| id.to_string()).collect();
        log::debug!("Merge: [{}] into {head}", members.join(","));
        self.current_chain.clear();
    }

    fn branched(&mut self, source: TrackletId, parent: TrackletId, children: [TrackletId; 2]) {
        self.branches += 1;
        log::debug!(
            "Branch: {source} (parent {parent}) -> {{{}, {}}}",
            children[0],
            children[1]
        );
    }

    fn removed(&mut self, before: usize, after: usize) {
        self.removed += before.saturating_sub(after);
        log::debug!("Tracks before merge: {before}, now {after}");
    }

    fn finalized(&mut self, report: &FinalizeReport) {
        self.finalize = Some(*report);
        log::debug!(
            "Finalised: {} dummies numbered, {} trailing dummies trimmed",
            report.dummies,
            report.trimmed
        );
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
