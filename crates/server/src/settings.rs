//! Settings API endpoints

use api_types::settings::{SettingsUpdate, SettingsView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

fn view(model: engine::settings::Model) -> SettingsView {
    SettingsView {
        default_daily_sales_minor: model.default_daily_sales_minor,
        safety_threshold_minor: model.safety_threshold_minor,
    }
}

/// Returns the global settings, creating the row with defaults on first
/// access.
pub async fn get(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SettingsView>, ServerError> {
    Ok(Json(view(state.engine.settings().await?)))
}

/// Applies a partial settings update.
pub async fn update(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<SettingsView>, ServerError> {
    let model = state
        .engine
        .update_settings(
            payload.default_daily_sales_minor,
            payload.safety_threshold_minor,
        )
        .await?;

    Ok(Json(view(model)))
}
