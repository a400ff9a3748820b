//! Settings provider: one row, created with defaults on first access.

use sea_orm::{ActiveValue, prelude::*};

use super::Engine;
use crate::{EngineError, ResultEngine, settings};

impl Engine {
    /// Returns the global settings row, creating it with defaults when the
    /// table is still empty.
    pub async fn settings(&self) -> ResultEngine<settings::Model> {
        if let Some(model) = settings::Entity::find().one(&self.database).await? {
            return Ok(model);
        }

        let defaults = settings::ActiveModel {
            default_daily_sales_minor: ActiveValue::Set(settings::DEFAULT_DAILY_SALES_MINOR),
            safety_threshold_minor: ActiveValue::Set(settings::DEFAULT_SAFETY_THRESHOLD_MINOR),
            ..Default::default()
        };
        Ok(defaults.insert(&self.database).await?)
    }

    /// Applies a partial settings update; absent fields keep their value.
    pub async fn update_settings(
        &self,
        default_daily_sales_minor: Option<i64>,
        safety_threshold_minor: Option<i64>,
    ) -> ResultEngine<settings::Model> {
        if let Some(value) = default_daily_sales_minor
            && value < 0
        {
            return Err(EngineError::InvalidAmount(
                "default daily sales must be >= 0".to_string(),
            ));
        }

        let mut model: settings::ActiveModel = self.settings().await?.into();
        if let Some(value) = default_daily_sales_minor {
            model.default_daily_sales_minor = ActiveValue::Set(value);
        }
        if let Some(value) = safety_threshold_minor {
            model.safety_threshold_minor = ActiveValue::Set(value);
        }

        Ok(model.update(&self.database).await?)
    }
}
