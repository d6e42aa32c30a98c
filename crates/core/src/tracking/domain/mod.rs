pub mod dummy_registry;
pub mod hypothesis;
pub mod observation;
pub mod tracklet;
pub mod tracklet_store;
