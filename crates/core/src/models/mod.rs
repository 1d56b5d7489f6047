/// Appointments and booking request/response shapes
pub mod appointment;
/// Bookable services
pub mod service;
/// Slots, day categories, and availability responses
pub mod slot;
/// Staff members and their layered scheduling rules
pub mod staff;
