//! Day-record API endpoints: opening cash, sales, policy, month reset.

use api_types::cashflow::{DayRecordView, DaySettingsUpdate, MonthReset, OpeningCashNew, SalesNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use engine::{EngineError, Month};

use crate::{ServerError, server::ServerState, user};

fn record_view(model: engine::days::Model) -> DayRecordView {
    DayRecordView {
        date: model.date,
        opening_cash_minor: model.opening_cash_minor,
        is_opening_cash_manual: model.is_opening_cash_manual,
        sales_minor: model.sales_minor,
        use_default_sales: model.use_default_sales,
        deduct_same_day: model.deduct_same_day,
    }
}

fn parse_date(token: &str) -> Result<NaiveDate, ServerError> {
    token
        .parse()
        .map_err(|_| EngineError::InvalidDate(format!("invalid date: {token:?}")).into())
}

/// Sets and pins the opening balance for a date.
pub async fn opening_cash_new(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<OpeningCashNew>,
) -> Result<Json<DayRecordView>, ServerError> {
    let day = state
        .engine
        .set_opening_cash(payload.date, payload.amount_minor)
        .await?;

    Ok(Json(record_view(day)))
}

/// Sets a manual sales value for a date.
pub async fn sales_new(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SalesNew>,
) -> Result<Json<DayRecordView>, ServerError> {
    let day = state
        .engine
        .set_sales(payload.date, payload.amount_minor)
        .await?;

    Ok(Json(record_view(day)))
}

/// Partial update of one day's policy flags.
pub async fn update_day(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(date): Path<String>,
    Json(payload): Json<DaySettingsUpdate>,
) -> Result<Json<DayRecordView>, ServerError> {
    let date = parse_date(&date)?;
    let day = state
        .engine
        .update_day_settings(date, payload.deduct_same_day, payload.sales_minor)
        .await?;

    Ok(Json(record_view(day)))
}

/// Wipes every day record and payment of a month.
pub async fn reset_month(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<MonthReset>, ServerError> {
    let month: Month = month.parse()?;
    state.engine.reset_month(month).await?;

    Ok(Json(MonthReset {
        month: month.to_string(),
    }))
}
