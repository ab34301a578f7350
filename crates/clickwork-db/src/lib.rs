//! Clickwork DB - Persistence layer using native_db
//!
//! Provides durable storage for:
//! - Player aggregates (one scalar record plus one row per owned relation)
//! - Active order assignments (one row per player, the storage-level
//!   backstop for the single-active-order rule)
//! - The append-only economy log
//!
//! [`GameSession`] binds catalog, config, and store behind the verbs a chat
//! shell calls; every action commits its full mutation set in one write
//! transaction.

mod error;
mod models;
mod session;
mod store;

pub use error::{Error, Result};
pub use session::GameSession;
pub use store::GameStore;
