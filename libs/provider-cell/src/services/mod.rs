// libs/provider-cell/src/services/mod.rs
pub mod availability;
pub mod directory;
pub mod schedule;

pub use availability::DayAvailabilityService;
pub use directory::ProviderDirectoryService;
pub use schedule::ProviderScheduleService;
