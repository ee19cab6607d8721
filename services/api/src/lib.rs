//! HTTP surface of the Virtual Garden API
//!
//! Every protected request flows through the same stages: the token is
//! verified into an identity, an optional role gate runs, the target record is
//! loaded, the ownership rule is applied, and only then does the handler act.

pub mod access;
pub mod error;
pub mod loader;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
