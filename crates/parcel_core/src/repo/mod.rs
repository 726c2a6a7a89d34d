//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for parcel records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories never open, configure, or migrate the connection they use.
//! - Status guards are query predicates, not check-then-act reads.

pub mod parcel_repo;
