//! Core use-case services.
//!
//! # Responsibility
//! - Provide scoped connection ownership (`Session`) and unit-of-work access.
//! - Orchestrate multi-entity writes on top of repository contracts.
//!
//! # Invariants
//! - Services never bypass repository validation or referential checks.
//! - Services stay storage-agnostic; atomicity comes from `Session::transaction`.

pub mod booking_service;
pub mod session;
pub mod store_service;
