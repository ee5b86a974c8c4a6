//! Shared application state for request handlers.

use std::sync::Arc;

use crate::dice::{Roller, ThreadRngRoller};
use crate::dice_log::EventSink;
use crate::readiness::Readiness;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Handlers only see the dice log and the roller through traits, so tests can
/// swap in an in-memory sink or a fixed roller.
#[derive(Clone)]
pub struct AppState {
    pub readiness: Readiness,
    pub roller: Arc<dyn Roller>,
    pub dice_log: Arc<dyn EventSink>,
}

impl AppState {
    /// Creates application state that rolls with the thread-local generator.
    pub fn new(readiness: Readiness, dice_log: Arc<dyn EventSink>) -> Self {
        Self::with_roller(readiness, Arc::new(ThreadRngRoller), dice_log)
    }

    pub fn with_roller(
        readiness: Readiness,
        roller: Arc<dyn Roller>,
        dice_log: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            readiness,
            roller,
            dice_log,
        }
    }
}
