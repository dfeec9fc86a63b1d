//! Library exports for stays-server.
//!
//! The router is exposed here so integration tests can drive the full HTTP
//! surface without binding a socket.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
