use std::collections::HashSet;

use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::tracklet::TrackletId;
use crate::tracking::domain::tracklet_store::TrackletStore;

use super::hypothesis_classifier::LinkHypothesis;
use super::hypothesis_index::HypothesisIndex;
use super::reconcile_observer::ReconcileObserver;

/// What to do when a link chain leads back into itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Stop the chain at the repeated tracklet and keep going.
    #[default]
    Terminate,
    /// Reject the whole pass with `ReconcileError::CyclicHypothesis`.
    Fail,
}

/// A maximal run of link hypotheses: `head`, then every tracklet absorbed
/// into it, in chain order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub head: TrackletId,
    pub members: Vec<TrackletId>,
}

impl Chain {
    /// Number of tracklets in the chain, head included.
    pub fn length(&self) -> usize {
        self.members.len() + 1
    }
}

/// Fuses chains of link hypotheses into their head tracklet.
///
/// Work is split in two: [`ChainMerger::plan`] walks the link index
/// without touching the store (and is where cycles are detected), then
/// [`ChainMerger::apply`] performs the joins.
pub struct ChainMerger {
    policy: CyclePolicy,
}

impl ChainMerger {
    pub fn new(policy: CyclePolicy) -> Self {
        Self { policy }
    }

    /// Follow every chain, heads in ascending identifier order.
    ///
    /// A tracklet already claimed by an earlier chain ends the current one.
    /// Revisiting a member of the current chain is a cycle, handled per the
    /// configured policy.
    pub fn plan(
        &self,
        links: &HypothesisIndex<LinkHypothesis>,
    ) -> Result<Vec<Chain>, ReconcileError> {
        let mut visited: HashSet<TrackletId> = HashSet::new();
        let mut chains = Vec::new();

        for (head, link) in links.iter() {
            if !visited.insert(head) {
                continue;
            }

            let mut members: Vec<TrackletId> = Vec::new();
            let mut next = Some(link.target);
            while let Some(id) = next {
                if visited.contains(&id) {
                    let in_current = id == head || members.contains(&id);
                    if in_current && self.policy == CyclePolicy::Fail {
                        return Err(ReconcileError::CyclicHypothesis {
                            head,
                            revisited: id,
                        });
                    }
                    if in_current {
                        log::warn!("Link cycle at tracklet {id}; chain {head} stopped");
                    } else {
                        log::warn!(
                            "Tracklet {id} already belongs to another chain; chain {head} stopped"
                        );
                    }
                    break;
                }
                visited.insert(id);
                members.push(id);
                next = links.first(id).map(|l| l.target);
            }

            if !members.is_empty() {
                chains.push(Chain { head, members });
            }
        }

        Ok(chains)
    }

    /// Join every chain member into its head.
    ///
    /// Returns the number of joins performed.
    pub fn apply(
        &self,
        store: &mut TrackletStore,
        chains: &[Chain],
        observer: &mut dyn ReconcileObserver,
    ) -> Result<usize, ReconcileError> {
        let mut joins = 0;
        for chain in chains {
            observer.chain_started(chain.head);
            for &member in &chain.members {
                join(store, chain.head, member)?;
                observer.joined(chain.head, member);
                joins += 1;
            }
            observer.chain_finished(chain.head, chain.length());
        }
        Ok(joins)
    }

}

impl Default for ChainMerger {
    fn default() -> Self {
        Self::new(CyclePolicy::default())
    }
}

/// Append `absorbed` onto `head` and retire it.
///
/// The head takes over the absorbed tracklet's fate, so whatever happened
/// at the end of a chain (e.g. a division) becomes the fate of the track.
pub fn join(
    store: &mut TrackletStore,
    head: TrackletId,
    absorbed: TrackletId,
) -> Result<(), ReconcileError> {
    if !store.contains(head) {
        return Err(ReconcileError::UnknownTracklet(head));
    }
    let tail = store.tracklet_mut(absorbed)?;
    let fate = tail.fate();
    let observations = tail.absorb_into(head);

    let target = store.tracklet_mut(head)?;
    for observation in observations {
        target.append(observation);
    }
    target.set_fate(fate);
    Ok(())
}
