//! Adaptive interview engine that narrows a fixed catalog of yacht classes
//! down to a single recommendation by asking a bounded sequence of
//! multiple-choice questions and scoring each answer's effect on every class.
//!
//! The engine itself is synchronous and owns no global state; the interaction
//! loop (HTTP routes or the CLI demo in `services/api`) threads a [`advisor::Session`]
//! through each turn. Commentary and analytics are best-effort collaborators
//! whose failures never reach the decision flow.

pub mod advisor;
pub mod analytics;
pub mod catalog;
pub mod commentary;
pub mod config;
pub mod error;
pub mod telemetry;
