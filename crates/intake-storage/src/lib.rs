//! intake-storage
//!
//! Durable sessions and snapshots as JSON objects with ETag optimistic
//! locking. A conflicting write fails instead of interleaving, which keeps
//! at most one answer in flight per session.

pub mod answer;
pub mod error;
pub mod objects;
pub mod sessions;
pub mod snapshots;
pub mod state;
