//! # Storage Module
//!
//! The club data lives in a hosted document database shared by every
//! admin client. This module defines the small query-and-write interface
//! the domain layer consumes ([`store::DocumentStore`]), an in-memory
//! implementation for tests and local runs, and typed repositories per
//! collection.
//!
//! Writes are last-write-wins across concurrent editors; no optimistic
//! concurrency check is performed anywhere in this layer.

pub mod memory;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use repositories::{
    AttendanceRepository, EventRepository, MatchRepository, PlayerRepository,
    StandingsRepository,
};
pub use store::{CollectionQuery, Document, DocumentStore, Filter, OrderBy};
