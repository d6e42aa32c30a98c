pub mod constants;
pub mod reconcile_error;
