//! Flutter-facing bindings for the Homework for Life core.

pub mod api;
