//! # Detailbook Core
//!
//! Domain models and the scheduling engine for the detailbook booking
//! service. Everything here is pure, synchronous computation over data the
//! caller has already fetched: the engine never queries the database and
//! never reads the ambient clock. Time-dependent operations take an
//! explicit `now` so behaviour is reproducible in tests.

/// Error types shared across the workspace
pub mod errors;
/// Domain entities and boundary request/response shapes
pub mod models;
/// Availability resolution, conflict detection, and slot computation
pub mod scheduling;
