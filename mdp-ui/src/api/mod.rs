//! HTTP API handlers for mdp-ui

pub mod dashboard;
pub mod export;
pub mod handlers;

pub use dashboard::{cohort_view, compare_view, individual_view};
pub use export::export_csv;
pub use handlers::{delete_evaluation, health, list_evaluations, submit_evaluation, ApiError};
