pub mod chain_merger;
pub mod finalizer;
pub mod hypothesis_classifier;
pub mod hypothesis_index;
pub mod lineage_annotator;
pub mod reconcile_observer;
