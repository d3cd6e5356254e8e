//! Repository layer over the key-value backend.
//!
//! # Responsibility
//! - Isolate blob encoding and backend I/O from merge/business rules.
//!
//! # Invariants
//! - Repository APIs return typed `StoreError`s; swallowing and logging them
//!   is the service layer's job.

pub mod entry_repo;
