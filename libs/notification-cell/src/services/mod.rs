// libs/notification-cell/src/services/mod.rs
pub mod inbox;

pub use inbox::NotificationInboxService;
