//! Top-level startup error.

use crate::config::ConfigError;
use crate::dice_log::SinkError;
use crate::http::ServerError;

/// Anything that stops the service before or while serving.
///
/// Request handling itself cannot fail, so there is no `IntoResponse` impl.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Dice log unavailable: {0}")]
    DiceLog(#[from] SinkError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
