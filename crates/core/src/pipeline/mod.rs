pub mod reconcile_config;
pub mod reconcile_tracks_use_case;
