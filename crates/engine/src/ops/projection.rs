//! Month projection entry point: loads state, runs the pure passes.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use super::Engine;
use crate::{
    Month, ResultEngine, days, payments,
    projection::{self, DayEntry},
};

impl Engine {
    /// Projects the full ledger for one month: exactly one entry per
    /// calendar day, ascending.
    ///
    /// Loads the settings once and every day record and payment inside the
    /// month range, then reconstructs the ledger in memory. Read-only (the
    /// settings row is lazily created on first access); two calls without
    /// intervening writes return identical output.
    pub async fn project_month(&self, month: Month) -> ResultEngine<Vec<DayEntry>> {
        let settings = self.settings().await?;

        let day_models = days::Entity::find()
            .filter(days::Column::Date.between(month.first_day(), month.last_day()))
            .order_by_asc(days::Column::Date)
            .all(&self.database)
            .await?;
        let payment_models = payments::Entity::find()
            .filter(payments::Column::Date.between(month.first_day(), month.last_day()))
            .order_by_asc(payments::Column::Date)
            .order_by_asc(payments::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let days_by_date: HashMap<NaiveDate, days::Model> = day_models
            .into_iter()
            .map(|day| (day.date, day))
            .collect();
        let mut payments_by_date: HashMap<NaiveDate, Vec<payments::Model>> = HashMap::new();
        for payment in payment_models {
            payments_by_date.entry(payment.date).or_default().push(payment);
        }

        Ok(projection::project(
            month,
            &settings,
            &days_by_date,
            payments_by_date,
        ))
    }
}
