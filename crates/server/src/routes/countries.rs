//! Country list for address forms.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::services::Country;
use crate::state::AppState;

/// Countries sorted by name.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    let countries = state.countries().list().await?;
    Ok(Json(countries.as_ref().clone()))
}
