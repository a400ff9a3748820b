//! Day-record writes: opening cash, sales, policy flags, month reset.
//!
//! None of these recompute anything; the projection always rebuilds the
//! month from current state on read.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use super::Engine;
use crate::{EngineError, Month, ResultEngine, days, payments};

impl Engine {
    /// Loads the day record for `date`, creating it with policy defaults
    /// (and a snapshot of the current default sales) when absent.
    pub async fn get_or_create_day(&self, date: NaiveDate) -> ResultEngine<days::Model> {
        if let Some(day) = days::Entity::find()
            .filter(days::Column::Date.eq(date))
            .one(&self.database)
            .await?
        {
            return Ok(day);
        }

        let defaults = self.settings().await?;
        let day = days::ActiveModel {
            date: ActiveValue::Set(date),
            opening_cash_minor: ActiveValue::Set(None),
            is_opening_cash_manual: ActiveValue::Set(false),
            sales_minor: ActiveValue::Set(Some(defaults.default_daily_sales_minor)),
            manual_sales_minor: ActiveValue::Set(None),
            use_default_sales: ActiveValue::Set(true),
            deduct_same_day: ActiveValue::Set(true),
            ..Default::default()
        };
        Ok(day.insert(&self.database).await?)
    }

    /// Sets the opening balance for a date and pins it: the projection will
    /// never overwrite a pinned opening with a carried one.
    pub async fn set_opening_cash(
        &self,
        date: NaiveDate,
        amount_minor: i64,
    ) -> ResultEngine<days::Model> {
        if amount_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "opening cash must be >= 0".to_string(),
            ));
        }

        let mut day: days::ActiveModel = self.get_or_create_day(date).await?.into();
        day.opening_cash_minor = ActiveValue::Set(Some(amount_minor));
        day.is_opening_cash_manual = ActiveValue::Set(true);
        Ok(day.update(&self.database).await?)
    }

    /// Sets a manual sales value for a date, switching the day off the
    /// global default.
    pub async fn set_sales(&self, date: NaiveDate, amount_minor: i64) -> ResultEngine<days::Model> {
        if amount_minor < 0 {
            return Err(EngineError::InvalidAmount("sales must be >= 0".to_string()));
        }

        let mut day: days::ActiveModel = self.get_or_create_day(date).await?.into();
        day.sales_minor = ActiveValue::Set(Some(amount_minor));
        day.manual_sales_minor = ActiveValue::Set(Some(amount_minor));
        day.use_default_sales = ActiveValue::Set(false);
        Ok(day.update(&self.database).await?)
    }

    /// Partial update of a day's policy: the deduction flag and/or a manual
    /// sales value.
    pub async fn update_day_settings(
        &self,
        date: NaiveDate,
        deduct_same_day: Option<bool>,
        sales_minor: Option<i64>,
    ) -> ResultEngine<days::Model> {
        if let Some(amount) = sales_minor
            && amount < 0
        {
            return Err(EngineError::InvalidAmount("sales must be >= 0".to_string()));
        }

        let mut day: days::ActiveModel = self.get_or_create_day(date).await?.into();
        if let Some(flag) = deduct_same_day {
            day.deduct_same_day = ActiveValue::Set(flag);
        }
        if let Some(amount) = sales_minor {
            day.sales_minor = ActiveValue::Set(Some(amount));
            day.manual_sales_minor = ActiveValue::Set(Some(amount));
            day.use_default_sales = ActiveValue::Set(false);
        }
        Ok(day.update(&self.database).await?)
    }

    /// Hard-deletes every payment and day record of the month. Irreversible;
    /// the next projection falls back to the zero-record bootstrap.
    pub async fn reset_month(&self, month: Month) -> ResultEngine<()> {
        let tx = self.database.begin().await?;

        payments::Entity::delete_many()
            .filter(payments::Column::Date.between(month.first_day(), month.last_day()))
            .exec(&tx)
            .await?;
        days::Entity::delete_many()
            .filter(days::Column::Date.between(month.first_day(), month.last_day()))
            .exec(&tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
