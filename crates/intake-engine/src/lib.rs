//! intake-engine
//!
//! The adaptive assessment engine: pattern matching, under-reporting
//! monitoring, module progression, next-question selection, scoring and
//! cross-report aggregation. No I/O beyond the config file helpers.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod monitor;
pub mod narrative;
pub mod patterns;
pub mod scoring;
pub mod selector;
pub mod severity;
pub mod tracker;

pub use engine::AssessmentEngine;
