//! # CoachTrack
//!
//! Workshop tracking backend for railway coaches.
//!
//! A coach enters the workshop on its offered date, collects material usage
//! while it is worked on, and is eventually marked completed. The crate counts
//! the working days a coach has spent in the workshop, keeps each coach's
//! material ledger, and aggregates monthly work-type reports.
//!
//! ## Architecture
//!
//! - [`models`]: Coaches, materials, holidays, identifiers and the clock
//! - [`services`]: Pure computations (calendar, ledger, reports, inventory)
//! - [`db`]: Repository traits, local and file stores, service layer
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
