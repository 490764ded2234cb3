//! Persistence: repository ports and the adapters that implement them.

pub mod context;
pub mod infrastructure;
pub mod ports;

pub use context::DatabaseContext;
pub use infrastructure::memory::InMemoryDatabase;
pub use infrastructure::postgres::PostgresDatabase;
