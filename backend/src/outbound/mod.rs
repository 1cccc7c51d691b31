//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed owned-resource repositories using
//!   Diesel ORM
//!
//! Adapters are thin translators between domain types and storage rows. They
//! contain no ownership logic.

pub mod persistence;
