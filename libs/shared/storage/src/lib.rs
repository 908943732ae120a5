pub mod client;
pub mod memory;
pub mod store;
pub mod supabase;

pub use client::SupabaseClient;
pub use memory::MemoryStore;
pub use store::{AppointmentStore, NotificationStore, StoreError, UserStore};
pub use supabase::SupabaseStore;
