use std::collections::{HashMap, HashSet};

use crate::shared::constants::MAX_RENAME_HOPS;
use crate::shared::reconcile_error::ReconcileError;

use super::dummy_registry::DummyRegistry;
use super::observation::Observation;
use super::tracklet::{Tracklet, TrackletId};

/// Owns the living tracklets and the placeholders found by the last
/// finalization.
///
/// Tracklets are kept in insertion order (the "store order" used when
/// numbering placeholders) with an id → slot table for constant-time
/// lookup. Absorbed tracklets stay in place, reachable through their
/// rename pointer, until [`TrackletStore::remove_absorbed`] runs.
#[derive(Clone, Debug, Default)]
pub struct TrackletStore {
    tracklets: Vec<Tracklet>,
    slots: HashMap<TrackletId, usize>,
    dummies: DummyRegistry,
}

impl TrackletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracklets(
        tracklets: impl IntoIterator<Item = Tracklet>,
    ) -> Result<Self, ReconcileError> {
        let mut store = Self::new();
        for tracklet in tracklets {
            store.insert(tracklet)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, tracklet: Tracklet) -> Result<(), ReconcileError> {
        let id = tracklet.id();
        if self.slots.contains_key(&id) {
            return Err(ReconcileError::DuplicateTracklet(id));
        }
        if let Some(observation) = tracklet
            .observations()
            .iter()
            .find(|o| !o.dummy && o.id < 0)
        {
            return Err(ReconcileError::NegativeObservationId {
                tracklet: id,
                id: observation.id,
            });
        }
        self.slots.insert(id, self.tracklets.len());
        self.tracklets.push(tracklet);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tracklets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracklets.is_empty()
    }

    pub fn contains(&self, id: TrackletId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: TrackletId) -> Option<&Tracklet> {
        self.slots.get(&id).map(|&slot| &self.tracklets[slot])
    }

    pub fn get_mut(&mut self, id: TrackletId) -> Option<&mut Tracklet> {
        self.slots.get(&id).map(|&slot| &mut self.tracklets[slot])
    }

    pub(crate) fn tracklet_mut(
        &mut self,
        id: TrackletId,
    ) -> Result<&mut Tracklet, ReconcileError> {
        self.get_mut(id).ok_or(ReconcileError::UnknownTracklet(id))
    }

    /// Tracklets in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Tracklet> {
        self.tracklets.iter()
    }

    pub fn ids(&self) -> Vec<TrackletId> {
        self.tracklets.iter().map(Tracklet::id).collect()
    }

    /// Size a hypothesis index must have to cover every identifier in the
    /// store: one past the largest id.
    pub fn id_space(&self) -> usize {
        self.tracklets
            .iter()
            .map(|t| t.id() as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Follow rename pointers to the tracklet that now holds `id`'s
    /// observations. Returns `None` for unknown identifiers.
    pub fn resolve(&self, id: TrackletId) -> Option<TrackletId> {
        let mut current = self.get(id)?;
        for _ in 0..MAX_RENAME_HOPS {
            match current.renamed_to() {
                Some(next) => current = self.get(next)?,
                None => return Some(current.id()),
            }
        }
        log::warn!("Rename chain from tracklet {id} exceeds {MAX_RENAME_HOPS} hops");
        Some(current.id())
    }

    /// Erase every tracklet flagged for removal. Returns how many were erased.
    pub fn remove_absorbed(&mut self) -> usize {
        let before = self.tracklets.len();
        self.tracklets.retain(|t| !t.is_marked_for_removal());
        self.slots = self
            .tracklets
            .iter()
            .enumerate()
            .map(|(slot, t)| (t.id(), slot))
            .collect();
        before - self.tracklets.len()
    }

    pub fn dummies(&self) -> &DummyRegistry {
        &self.dummies
    }

    /// Look up a finalized placeholder by its negative identifier.
    pub fn get_dummy(&self, id: i64) -> Result<&Observation, ReconcileError> {
        let locator = self.dummies.locate(id)?;
        self.get(locator.tracklet)
            .and_then(|t| t.observations().get(locator.position))
            .filter(|o| o.dummy)
            .ok_or(ReconcileError::DummyIdOutOfRange {
                id,
                count: self.dummies.len(),
            })
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [Tracklet], &mut DummyRegistry) {
        (&mut self.tracklets, &mut self.dummies)
    }

    /// Tracklets without a parent, in store order.
    pub fn roots(&self) -> impl Iterator<Item = &Tracklet> {
        self.tracklets.iter().filter(|t| t.parent().is_none())
    }

    /// `root` followed by all of its descendants, depth first.
    pub fn lineage(&self, root: TrackletId) -> Vec<TrackletId> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(tracklet) = self.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            stack.extend(tracklet.children().iter().rev());
        }
        order
    }
}
