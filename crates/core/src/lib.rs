pub mod pipeline;
pub mod reconciliation;
pub mod scenario;
pub mod shared;
pub mod tracking;
