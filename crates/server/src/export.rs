//! CSV export of a projected month

use axum::{
    Extension,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use csv::Writer;
use engine::{DayEntry, Month};

use crate::{ServerError, server::ServerState, user};

/// Formats integer cents as a plain `1234.56` decimal string.
fn format_minor(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn payment_details(entry: &DayEntry) -> String {
    entry
        .payments
        .iter()
        .map(|payment| match &payment.description {
            Some(description) => format!(
                "{}: {} - {}",
                payment.recipient_name,
                format_minor(payment.amount_minor),
                description
            ),
            None => format!(
                "{}: {}",
                payment.recipient_name,
                format_minor(payment.amount_minor)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the spreadsheet for one month out of the projected ledger.
pub async fn get(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let month: Month = month.parse()?;
    let entries = state.engine.project_month(month).await?;

    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Date", "Day", "Sales", "Opening", "Payments", "Ending", "Status", "Details",
        ])
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    for entry in &entries {
        writer
            .write_record([
                entry.date.to_string(),
                entry.weekday.clone(),
                format_minor(entry.sales_minor),
                format_minor(entry.opening_cash_minor),
                format_minor(entry.total_payments_minor),
                format_minor(entry.ending_cash_minor),
                entry.status.as_str().to_string(),
                payment_details(entry),
            ])
            .map_err(|err| ServerError::Generic(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"cashflow-{month}.csv\""),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minor_units_as_decimals() {
        assert_eq!(format_minor(0), "0.00");
        assert_eq!(format_minor(1), "0.01");
        assert_eq!(format_minor(600_000), "6000.00");
        assert_eq!(format_minor(-1), "-0.01");
        assert_eq!(format_minor(-123_450), "-1234.50");
    }
}
