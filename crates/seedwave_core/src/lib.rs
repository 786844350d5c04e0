//! Seedwave catalog core.
//!
//! Domain types, the `CatalogStore` port with an in-memory adapter, the
//! catalog service, the fixed brand hierarchy and solution catalog, and the
//! idempotent seeder. Nothing here depends on sqlx or axum.

pub mod error;
pub mod hierarchy;
pub mod memory;
pub mod ports;
pub mod seeds;
pub mod service;
pub mod solutions;
pub mod types;

pub use error::SeedwaveError;
pub use ports::CatalogStore;
pub use service::CatalogService;
