/// Availability queries: per-day slots, the bulk calendar, staff lookup
pub mod availability;
/// Booking validation and creation
pub mod booking;
/// Service catalog listing
pub mod services;
