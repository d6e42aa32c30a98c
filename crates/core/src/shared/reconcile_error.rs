use thiserror::Error;

use crate::tracking::domain::tracklet::TrackletId;

/// Caller misuse detected by a reconciliation pass or a store query.
///
/// None of these are expected at runtime: they signal hypotheses that do
/// not match the store, or a lookup outside the finalized placeholder set.
/// The store is left untouched whenever a pass returns one of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("hypothesis references unknown tracklet {0}")]
    UnknownTracklet(TrackletId),
    #[error("tracklet {0} already exists in the store")]
    DuplicateTracklet(TrackletId),
    #[error("tracklet {tracklet} holds real observation with negative id {id}")]
    NegativeObservationId { tracklet: TrackletId, id: i64 },
    #[error("tracklet {id} is outside the hypothesis index (capacity {capacity})")]
    IndexOutOfRange { id: TrackletId, capacity: usize },
    #[error("link chain starting at {head} revisits tracklet {revisited}")]
    CyclicHypothesis {
        head: TrackletId,
        revisited: TrackletId,
    },
    #[error("dummy lookup requires a negative identifier, got {0}")]
    DummyIdNotNegative(i64),
    #[error("dummy registry is empty")]
    EmptyDummyRegistry,
    #[error("dummy identifier {id} is out of range ({count} dummies registered)")]
    DummyIdOutOfRange { id: i64, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unknown_tracklet(
        ReconcileError::UnknownTracklet(7),
        "hypothesis references unknown tracklet 7"
    )]
    #[case::negative_observation(
        ReconcileError::NegativeObservationId { tracklet: 2, id: -5 },
        "tracklet 2 holds real observation with negative id -5"
    )]
    #[case::cyclic_hypothesis(
        ReconcileError::CyclicHypothesis { head: 1, revisited: 3 },
        "link chain starting at 1 revisits tracklet 3"
    )]
    #[case::dummy_out_of_range(
        ReconcileError::DummyIdOutOfRange { id: -4, count: 2 },
        "dummy identifier -4 is out of range (2 dummies registered)"
    )]
    fn test_error_messages(#[case] err: ReconcileError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}
