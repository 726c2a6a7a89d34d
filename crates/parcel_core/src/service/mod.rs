//! Use-case services on top of repository contracts.
//!
//! # Responsibility
//! - Provide tracker-level entry points (register, advance, relocate).
//! - Keep storage details behind repository traits.

pub mod parcel_service;
