//! klara-core
//!
//! Pure domain types for the Klara dry-eye intake: questions, answers,
//! severity bands, assessment results and the symptom history.
//! No scoring logic lives here. This is the shared vocabulary.

pub mod error;
pub mod models;
