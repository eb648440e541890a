//! klara-assessment
//!
//! The dry-eye assessment flow: the built-in question bank, the
//! questionnaire state machine that walks a patient through safety
//! screening and the clinical questions, and the severity scorer it hands
//! the completed answers to. Pure logic, no I/O.

pub mod aggregate;
pub mod bank;
pub mod error;
pub mod questionnaire;
pub mod recommend;
pub mod scoring;

pub use questionnaire::{Event, Questionnaire, Session, State};
pub use scoring::{Thresholds, severity};
