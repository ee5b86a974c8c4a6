//! dice-service: a health probe and a dice roller over HTTP.
//!
//! Every roll is appended to a dice log (file + console). The binary in
//! `main.rs` wires configuration, diagnostics, the dice log and the server.

pub mod config;
pub mod dice;
pub mod dice_log;
pub mod error;
pub mod http;
pub mod middleware;
pub mod readiness;
pub mod routes;
pub mod state;

pub use error::AppError;
