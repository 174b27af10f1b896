//! # IO Module
//!
//! Interface layer exposing the domain services over HTTP. Pure
//! translation: serialization, status-code mapping and request logging,
//! no business logic.

pub mod rest;

pub use rest::*;
