pub mod connection;
pub mod events;
pub mod users;

pub use connection::{init_db, Database};
pub use events::SqliteEventStore;
