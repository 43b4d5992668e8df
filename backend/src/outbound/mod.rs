//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: user repositories backed by process memory or MongoDB
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod persistence;
