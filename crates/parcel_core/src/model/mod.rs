//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define the canonical parcel record and its status vocabulary.
//!
//! # Invariants
//! - Every parcel is identified by a storage-assigned `ParcelNumber`.
//! - Deletion is physical; there is no tombstone state.

pub mod parcel;
