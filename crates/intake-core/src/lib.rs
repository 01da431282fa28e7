//! intake-core
//!
//! Pure domain types for the adaptive assessment engine: questions,
//! responses, sessions, detected patterns and analysis outputs.
//! No engine logic lives here. These are the types the bank, engine,
//! storage and web layer share.

pub mod error;
pub mod models;
