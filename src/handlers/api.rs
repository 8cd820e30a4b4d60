use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::AppError;
use crate::pricing::{LoadState, PriceCalculator, RunnerRow, TableSnapshot};

/// JSON view of the table
#[derive(Debug, Serialize)]
pub struct RunnersResponse {
    #[serde(flatten)]
    pub state: LoadState,
    pub headers: Vec<String>,
    pub rows: Vec<RunnerRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
}

impl RunnersResponse {
    fn from_snapshot(snapshot: TableSnapshot, minutes: Option<f64>) -> Self {
        Self {
            state: snapshot.state,
            headers: snapshot.table.headers().to_vec(),
            rows: snapshot.table.rows().to_vec(),
            minutes,
        }
    }
}

/// Minutes as sent by the client, either a JSON number or text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MinutesInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub minutes: MinutesInput,
}

/// GET /api/runners
pub async fn list_runners(State(state): State<AppState>) -> Json<RunnersResponse> {
    let snapshot = state.service.snapshot().await;
    Json(RunnersResponse::from_snapshot(snapshot, None))
}

/// POST /api/calculate
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<RunnersResponse>, AppError> {
    let calculator = match &request.minutes {
        MinutesInput::Number(minutes) => PriceCalculator::new(*minutes)?,
        MinutesInput::Text(text) => PriceCalculator::from_input(text)?,
    };

    let mut snapshot = state.service.snapshot().await;
    calculator.apply(&mut snapshot.table);

    Ok(Json(RunnersResponse::from_snapshot(
        snapshot,
        Some(calculator.minutes()),
    )))
}
