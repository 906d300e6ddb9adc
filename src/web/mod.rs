//! Web interface module
//!
//! Maps HTTP requests onto the key-value operations of a `KvService`.
//! Status codes are decided here; the store itself knows nothing about HTTP.

mod handlers;
mod middleware;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::{build_router, run_web_server, shutdown_signal};
