/// Availability query endpoints
pub mod availability;
/// Booking validation and creation endpoints
pub mod booking;
/// Health check endpoints
pub mod health;
/// Service catalog endpoints
pub mod services;
