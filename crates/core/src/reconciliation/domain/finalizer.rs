use crate::shared::constants::FIRST_DUMMY_ID;
use crate::tracking::domain::dummy_registry::DummyLocator;
use crate::tracking::domain::tracklet_store::TrackletStore;

/// Hands out placeholder identifiers: -1, -2, -3, ...
///
/// Created fresh for every finalization, so numbering always restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DummyIdCounter {
    next: i64,
}

impl DummyIdCounter {
    pub fn new() -> Self {
        Self {
            next: FIRST_DUMMY_ID,
        }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next -= 1;
        id
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> usize {
        (FIRST_DUMMY_ID - self.next) as usize
    }
}

impl Default for DummyIdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one finalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Trailing placeholders dropped across all tracklets.
    pub trimmed: usize,
    /// Placeholders that received an identifier.
    pub dummies: usize,
    /// The counter after the last assignment.
    pub counter: DummyIdCounter,
}

impl Default for FinalizeReport {
    fn default() -> Self {
        Self {
            trimmed: 0,
            dummies: 0,
            counter: DummyIdCounter::new(),
        }
    }
}

/// Trims trailing placeholders and numbers the rest.
pub struct Finalizer;

impl Finalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rebuild the dummy registry from scratch.
    ///
    /// Placeholders are numbered in store order, then sequence order, so
    /// `-1` is the first placeholder of the first tracklet that has one.
    pub fn finalize(&self, store: &mut TrackletStore) -> FinalizeReport {
        log::debug!("Finalising all tracks...");

        let (tracklets, registry) = store.parts_mut();
        registry.clear();

        let mut counter = DummyIdCounter::new();
        let mut trimmed = 0;
        for tracklet in tracklets.iter_mut() {
            trimmed += tracklet.trim();

            let id = tracklet.id();
            for (position, observation) in tracklet.observations_mut().iter_mut().enumerate() {
                if observation.dummy {
                    observation.id = counter.next_id();
                    registry.push(DummyLocator {
                        tracklet: id,
                        position,
                    });
                }
            }
        }

        FinalizeReport {
            trimmed,
            dummies: counter.issued(),
            counter,
        }
    }
}

impl Default for Finalizer {
    fn default() -> Self {
        Self::new()
    }
}
