use serde::Deserialize;

use crate::shared::reconcile_error::ReconcileError;
use crate::tracking::domain::hypothesis::Hypothesis;
use crate::tracking::domain::observation::Observation;
use crate::tracking::domain::tracklet::{Tracklet, TrackletId};
use crate::tracking::domain::tracklet_store::TrackletStore;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrackletRecord {
    pub id: TrackletId,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// Input for one reconciliation pass: the tracklets to load and the
/// hypotheses chosen for them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub tracklets: Vec<TrackletRecord>,
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
}

impl Scenario {
    /// Build a store from the tracklet records, in file order.
    pub fn into_parts(self) -> Result<(TrackletStore, Vec<Hypothesis>), ReconcileError> {
        let store = TrackletStore::from_tracklets(
            self.tracklets
                .into_iter()
                .map(|r| Tracklet::new(r.id, r.observations)),
        )?;
        Ok((store, self.hypotheses))
    }
}
