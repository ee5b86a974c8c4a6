//! HTTP server module.
//!
//! Serves plain HTTP; TLS is expected to be terminated by a reverse proxy.
//! The server drains gracefully on SIGTERM/SIGINT, reporting itself as not
//! ready while in-flight requests finish.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
