//! # MDP Common Library
//!
//! Shared code for the MDP performance survey service:
//! - Domain model (areas, functions, questions, evaluations)
//! - Score computation and rotation sequencing
//! - Cohort aggregation and head-to-head comparison
//! - Display-name formatting
//! - Configuration loading and database initialization

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod model;
pub mod names;
pub mod questions;
pub mod rotation;
pub mod scoring;

pub use error::{Error, Result};
