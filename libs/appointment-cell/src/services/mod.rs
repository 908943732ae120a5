// libs/appointment-cell/src/services/mod.rs
pub mod availability;
pub mod booking;
pub mod lifecycle;

pub use availability::SlotAvailabilityService;
pub use booking::AppointmentBookingService;
pub use lifecycle::AppointmentLifecycleService;
