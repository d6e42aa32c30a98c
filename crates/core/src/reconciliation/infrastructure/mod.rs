pub mod log_reconcile_observer;
