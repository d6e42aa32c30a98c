use serde::Deserialize;

/// A single detected object instance at one time step.
///
/// Real detections carry a non-negative `id`. Placeholders (`dummy`) are
/// inserted upstream to bridge gaps in a track; they get a unique negative
/// `id` when the track set is finalized.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Observation {
    pub id: i64,
    pub t: u32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub dummy: bool,
}

impl Observation {
    pub fn new(id: i64, t: u32) -> Self {
        Self {
            id,
            t,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dummy: false,
        }
    }

    /// A placeholder at time `t`. Its identifier is meaningless until the
    /// finalizer assigns one.
    pub fn dummy(t: u32) -> Self {
        Self {
            dummy: true,
            ..Self::new(0, t)
        }
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_real_detection_at_origin() {
        let obs = Observation::new(4, 10);
        assert_eq!(obs.id, 4);
        assert_eq!(obs.t, 10);
        assert!(!obs.dummy);
        assert_eq!((obs.x, obs.y, obs.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_dummy_sets_flag() {
        let obs = Observation::dummy(3);
        assert!(obs.dummy);
        assert_eq!(obs.t, 3);
    }

    #[test]
    fn test_with_position() {
        let obs = Observation::new(1, 0).with_position(1.5, -2.0, 0.25);
        assert_eq!((obs.x, obs.y, obs.z), (1.5, -2.0, 0.25));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let obs: Observation = serde_json::from_str(r#"{"id": 9, "t": 2}"#).unwrap();
        assert_eq!(obs, Observation::new(9, 2));
    }

    #[test]
    fn test_deserialize_dummy() {
        let obs: Observation =
            serde_json::from_str(r#"{"id": 0, "t": 5, "x": 1.0, "dummy": true}"#).unwrap();
        assert!(obs.dummy);
        assert_eq!(obs.x, 1.0);
    }
}
