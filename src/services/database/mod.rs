// Database service module
// SQLite connection, schema, and the text media the event store persists into

mod connection;
mod medium;
mod schema;

pub use connection::Database;
pub use medium::{DurableMedium, MemoryMedium, SqliteMedium};

#[cfg(test)]
pub use medium::MockDurableMedium;
