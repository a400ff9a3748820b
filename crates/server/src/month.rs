//! Month projection endpoint

use api_types::cashflow::{DayEntryView, DayStatus as ApiStatus, PaymentView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{DayEntry, DayStatus, Month};

use crate::{ServerError, server::ServerState, user};

fn map_status(status: DayStatus) -> ApiStatus {
    match status {
        DayStatus::Safe => ApiStatus::Safe,
        DayStatus::Warning => ApiStatus::Warning,
        DayStatus::Deficit => ApiStatus::Deficit,
    }
}

pub(crate) fn day_view(entry: DayEntry) -> DayEntryView {
    let payments = entry
        .payments
        .iter()
        .map(|payment| PaymentView {
            id: payment.id,
            date: entry.date,
            amount_minor: payment.amount_minor,
            recipient_name: payment.recipient_name.clone(),
            description: payment.description.clone(),
        })
        .collect();

    DayEntryView {
        date: entry.date,
        weekday: entry.weekday,
        sales_minor: entry.sales_minor,
        opening_cash_minor: entry.opening_cash_minor,
        ending_cash_minor: entry.ending_cash_minor,
        tomorrow_payments_minor: entry.tomorrow_payments_minor,
        payments,
        total_payments_minor: entry.total_payments_minor,
        status: map_status(entry.status),
        deduct_same_day: entry.deduct_same_day,
        is_opening_cash_manual: entry.is_opening_cash_manual,
        use_default_sales: entry.use_default_sales,
    }
}

/// Handle requests for the day-by-day ledger of one month.
pub async fn get(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<DayEntryView>>, ServerError> {
    let month: Month = month.parse()?;
    let entries = state.engine.project_month(month).await?;

    Ok(Json(entries.into_iter().map(day_view).collect()))
}
