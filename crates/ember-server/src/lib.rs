//! HTTP surface for the Ember content drop.
//!
//! Thin plumbing over [`ember_store::DropVault`]: upload (text and file),
//! pre-retrieval preview, and retrieval endpoints. Everything interesting
//! (crypto, expiry, burn-after-read) lives in the vault; handlers only
//! translate between HTTP and the vault's vocabulary.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::EmberServer;
pub use state::AppState;
