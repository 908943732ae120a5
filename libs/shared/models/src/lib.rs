pub mod appointment;
pub mod auth;
pub mod error;
pub mod notification;
pub mod user;

pub use appointment::*;
pub use auth::*;
pub use error::AppError;
pub use notification::*;
pub use user::*;
