use std::fmt;

use super::observation::Observation;

pub type TrackletId = u32;

/// Outcome last applied to a tracklet by reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fate {
    #[default]
    Pending,
    Linked,
    Divided,
    Merged,
}

impl fmt::Display for Fate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fate::Pending => write!(f, "pending"),
            Fate::Linked => write!(f, "linked"),
            Fate::Divided => write!(f, "divided"),
            Fate::Merged => write!(f, "merged"),
        }
    }
}

/// A contiguous, time-ordered fragment of one object's trajectory.
///
/// Identity and lineage fields are only changed by reconciliation. Callers
/// may extend or trim the observation sequence through [`Tracklet::append`]
/// and [`Tracklet::trim`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tracklet {
    id: TrackletId,
    observations: Vec<Observation>,
    fate: Fate,
    parent: Option<TrackletId>,
    renamed_to: Option<TrackletId>,
    removal: bool,
    children: Vec<TrackletId>,
}

impl Tracklet {
    pub fn new(id: TrackletId, observations: Vec<Observation>) -> Self {
        Self {
            id,
            observations,
            fate: Fate::Pending,
            parent: None,
            renamed_to: None,
            removal: false,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> TrackletId {
        self.id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn fate(&self) -> Fate {
        self.fate
    }

    pub fn parent(&self) -> Option<TrackletId> {
        self.parent
    }

    /// The tracklet this one was absorbed into, if any.
    pub fn renamed_to(&self) -> Option<TrackletId> {
        self.renamed_to
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.removal
    }

    pub fn children(&self) -> &[TrackletId] {
        &self.children
    }

    pub fn start_time(&self) -> Option<u32> {
        self.observations.first().map(|o| o.t)
    }

    pub fn end_time(&self) -> Option<u32> {
        self.observations.last().map(|o| o.t)
    }

    pub fn dummy_count(&self) -> usize {
        self.observations.iter().filter(|o| o.dummy).count()
    }

    /// Append an observation to the end of the track. No re-estimation
    /// happens; the observation is stored as given.
    pub fn append(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Drop trailing placeholders until the last observation is real or the
    /// track is empty. Interior and leading placeholders are kept.
    ///
    /// Returns the number of observations removed.
    pub fn trim(&mut self) -> usize {
        let before = self.observations.len();
        while self.observations.last().is_some_and(|o| o.dummy) {
            self.observations.pop();
        }
        before - self.observations.len()
    }

    pub(crate) fn set_fate(&mut self, fate: Fate) {
        self.fate = fate;
    }

    pub(crate) fn set_parent(&mut self, parent: TrackletId) {
        self.parent = Some(parent);
    }

    pub(crate) fn add_child(&mut self, child: TrackletId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Hand the observations over to `head` and retire this tracklet.
    ///
    /// The sequence is moved out, so the retired record never aliases the
    /// observations now owned by the head.
    pub(crate) fn absorb_into(&mut self, head: TrackletId) -> Vec<Observation> {
        self.renamed_to = Some(head);
        self.removal = true;
        std::mem::take(&mut self.observations)
    }

    pub(crate) fn observations_mut(&mut self) -> &mut [Observation] {
        &mut self.observations
    }
}
