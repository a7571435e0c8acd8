//! Storage implementations.
//!
//! - `MemoryStore` - in-memory (always available; tests and development)
//! - `PostgresStore` - PostgreSQL via sqlx (requires the `postgres` feature)

pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
