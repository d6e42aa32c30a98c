use serde::Deserialize;

use super::tracklet::{Fate, TrackletId};

fn default_probability() -> f64 {
    1.0
}

/// The resolved outcome chosen upstream for one source tracklet.
///
/// `probability` is carried for reporting only. The hypothesis list handed
/// to a pass already holds one decision per source, so it never breaks ties.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Hypothesis {
    /// `source` continues as `target`.
    Link {
        source: TrackletId,
        target: TrackletId,
        #[serde(default = "default_probability")]
        probability: f64,
    },
    /// `source` splits into `child_a` and `child_b`.
    Divide {
        source: TrackletId,
        child_a: TrackletId,
        child_b: TrackletId,
        #[serde(default = "default_probability")]
        probability: f64,
    },
    /// Acknowledged but never acted upon.
    Merge {
        source: TrackletId,
        #[serde(default = "default_probability")]
        probability: f64,
    },
}

impl Hypothesis {
    pub fn link(source: TrackletId, target: TrackletId) -> Self {
        Hypothesis::Link {
            source,
            target,
            probability: 1.0,
        }
    }

    pub fn divide(source: TrackletId, child_a: TrackletId, child_b: TrackletId) -> Self {
        Hypothesis::Divide {
            source,
            child_a,
            child_b,
            probability: 1.0,
        }
    }

    pub fn merge(source: TrackletId) -> Self {
        Hypothesis::Merge {
            source,
            probability: 1.0,
        }
    }

    pub fn with_probability(mut self, value: f64) -> Self {
        match &mut self {
            Hypothesis::Link { probability, .. }
            | Hypothesis::Divide { probability, .. }
            | Hypothesis::Merge { probability, .. } => *probability = value,
        }
        self
    }

    pub fn source(&self) -> TrackletId {
        match self {
            Hypothesis::Link { source, .. }
            | Hypothesis::Divide { source, .. }
            | Hypothesis::Merge { source, .. } => *source,
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            Hypothesis::Link { probability, .. }
            | Hypothesis::Divide { probability, .. }
            | Hypothesis::Merge { probability, .. } => *probability,
        }
    }

    /// Fate the source tracklet takes when this hypothesis is accepted.
    pub fn fate(&self) -> Fate {
        match self {
            Hypothesis::Link { .. } => Fate::Linked,
            Hypothesis::Divide { .. } => Fate::Divided,
            Hypothesis::Merge { .. } => Fate::Merged,
        }
    }

    /// Every tracklet identifier this hypothesis refers to, source first.
    pub fn tracklet_ids(&self) -> Vec<TrackletId> {
        match self {
            Hypothesis::Link { source, target, .. } => vec![*source, *target],
            Hypothesis::Divide {
                source,
                child_a,
                child_b,
                ..
            } => vec![*source, *child_a, *child_b],
            Hypothesis::Merge { source, .. } => vec![*source],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::link(Hypothesis::link(1, 2), Fate::Linked)]
    #[case::divide(Hypothesis::divide(1, 2, 3), Fate::Divided)]
    #[case::merge(Hypothesis::merge(1), Fate::Merged)]
    fn test_fate_matches_kind(#[case] hypothesis: Hypothesis, #[case] expected: Fate) {
        assert_eq!(hypothesis.fate(), expected);
        assert_eq!(hypothesis.source(), 1);
    }

    #[rstest]
    #[case::link(Hypothesis::link(4, 9), vec![4, 9])]
    #[case::divide(Hypothesis::divide(4, 5, 6), vec![4, 5, 6])]
    #[case::merge(Hypothesis::merge(4), vec![4])]
    fn test_tracklet_ids(#[case] hypothesis: Hypothesis, #[case] expected: Vec<TrackletId>) {
        assert_eq!(hypothesis.tracklet_ids(), expected);
    }

    #[test]
    fn test_with_probability() {
        let h = Hypothesis::divide(1, 2, 3).with_probability(0.25);
        assert_eq!(h.probability(), 0.25);
    }

    #[test]
    fn test_deserialize_tagged_variants() {
        let json = r#"[
            {"kind": "link", "source": 1, "target": 2, "probability": 0.9},
            {"kind": "divide", "source": 2, "child_a": 3, "child_b": 4},
            {"kind": "merge", "source": 5}
        ]"#;
        let parsed: Vec<Hypothesis> = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            vec![
                Hypothesis::link(1, 2).with_probability(0.9),
                Hypothesis::divide(2, 3, 4),
                Hypothesis::merge(5),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let json = r#"{"kind": "apoptosis", "source": 1}"#;
        assert!(serde_json::from_str::<Hypothesis>(json).is_err());
    }
}
