//! Core use-case services.
//!
//! # Responsibility
//! - Expose the entry store operations the UI layer calls.
//! - Keep UI/FFI layers decoupled from storage and error details.

pub mod entry_store;
