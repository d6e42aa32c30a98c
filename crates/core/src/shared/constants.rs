/// Identifier given to the first finalized placeholder. Each later
/// placeholder in the same pass gets the next lower value.
pub const FIRST_DUMMY_ID: i64 = -1;

/// Upper bound on rename hops followed by `TrackletStore::resolve`.
///
/// Joins always point at the chain head, so a valid store never needs
/// more than one hop.
pub const MAX_RENAME_HOPS: usize = 64;

pub const SCENARIO_EXTENSIONS: &[&str] = &["json"];
