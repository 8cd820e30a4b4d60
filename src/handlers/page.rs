use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use crate::error::AppError;
use crate::pricing::PriceCalculator;
use crate::render::{render_page, PageView};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub minutes: Option<String>,
}

/// Render the runner price page
///
/// With `?minutes=`, prices are recomputed on a copy of the shared table. A
/// value that is not a number shows the notice and leaves prices untouched.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let mut snapshot = state.service.snapshot().await;
    let mut notice = None;

    if let Some(input) = query.minutes.as_deref() {
        match PriceCalculator::from_input(input) {
            Ok(calculator) => {
                calculator.apply(&mut snapshot.table);
            }
            Err(e) => {
                debug!("Rejected minutes value: {}", e);
                notice = Some(e.user_message());
            }
        }
    }

    let page = render_page(&PageView {
        title: &state.config.render.title,
        state: &snapshot.state,
        table: &snapshot.table,
        minutes: query.minutes.as_deref(),
        notice: notice.as_deref(),
        escape_fields: state.config.render.escape_html,
    })?;

    Ok(Html(page))
}
