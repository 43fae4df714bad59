//! Recruitment marketplace core.
//!
//! Employers publish jobs, candidates browse and apply, employers shortlist
//! and interview, and both sides receive notifications. This crate holds the
//! business rules and storage seams; the HTTP service wiring lives in the
//! `api` service crate.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
