//! Dice roll endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::dice::DiceRoll;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DiceResponse {
    pub dice_roll: DiceRoll,
}

/// Roll one die and record the outcome in the dice log.
///
/// A failed log write is reported but never turns into an error response.
pub async fn roll(State(state): State<AppState>) -> Json<DiceResponse> {
    let dice_roll = state.roller.roll();

    if let Err(e) = state.dice_log.record(&format!("Dice roll: {}", dice_roll)) {
        tracing::warn!(error = %e, roll = dice_roll.value(), "Failed to record dice roll");
    }

    Json(DiceResponse { dice_roll })
}
