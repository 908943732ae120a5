pub mod error;
pub mod models;
pub mod services;

pub use error::MailQueueError;
pub use models::{CanceledAppointment, CancellationMailJob};
pub use services::queue::{MailQueue, MemoryMailQueue, RedisMailQueue};
