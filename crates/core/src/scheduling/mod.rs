//! The availability engine. Resolution order for one staff member and one
//! instant: approved vacation, then date exceptions, then the base weekly
//! schedule. Slot generation and the bulk calendar aggregator walk candidate
//! slots against those resolved windows plus existing appointments, reading
//! only pre-fetched, pre-grouped data.

/// Bulk per-date categorization over a date range
pub mod aggregator;
/// Pre-grouped per-staff data the engine reads
pub mod calendar;
/// Appointment overlap detection
pub mod conflict;
/// Time-of-day range arithmetic
pub mod interval;
/// Vacation/exception/base-schedule resolution
pub mod resolver;
/// Host-supplied booking policy
pub mod settings;
/// Slot enumeration and booking validation
pub mod slots;
