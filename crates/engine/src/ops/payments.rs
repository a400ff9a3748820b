//! Payment writes and the supplier audit echo.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use super::{Engine, normalize_optional_text, normalize_required_name};
use crate::{EngineError, ResultEngine, payments, supplier_notes, suppliers};

/// Input for [`Engine::add_payment`].
#[derive(Clone, Debug)]
pub struct NewPayment {
    pub date: NaiveDate,
    pub amount_minor: i64,
    pub recipient_name: String,
    pub description: Option<String>,
}

impl Engine {
    /// Records a payment on its day, creating the day record when needed.
    ///
    /// When the trimmed recipient name matches a supplier name
    /// case-insensitively, a denormalized audit note is written for that
    /// supplier in the same transaction.
    pub async fn add_payment(&self, cmd: NewPayment) -> ResultEngine<payments::Model> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "payment amount must be > 0".to_string(),
            ));
        }
        let recipient_name = normalize_required_name(&cmd.recipient_name, "recipient")?;
        let description = normalize_optional_text(cmd.description.as_deref());

        self.get_or_create_day(cmd.date).await?;

        let tx = self.database.begin().await?;

        let payment = payments::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            date: ActiveValue::Set(cmd.date),
            amount_minor: ActiveValue::Set(cmd.amount_minor),
            recipient_name: ActiveValue::Set(recipient_name.clone()),
            description: ActiveValue::Set(description.clone()),
            created_at: ActiveValue::Set(Utc::now()),
        };
        let payment = payment.insert(&tx).await?;

        // Audit echo: mirror the payment onto the matching supplier, if any.
        let matched = suppliers::Entity::find()
            .all(&tx)
            .await?
            .into_iter()
            .find(|supplier| supplier.name.trim().to_lowercase() == recipient_name.to_lowercase());

        if let Some(supplier) = matched {
            let note = supplier_notes::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                supplier_id: ActiveValue::Set(supplier.id),
                payment_id: ActiveValue::Set(payment.id),
                amount_minor: ActiveValue::Set(cmd.amount_minor),
                recipient_name: ActiveValue::Set(recipient_name),
                date: ActiveValue::Set(cmd.date),
                description: ActiveValue::Set(description),
            };
            note.insert(&tx).await?;
        }

        tx.commit().await?;
        Ok(payment)
    }

    /// Returns a single payment.
    pub async fn payment(&self, id: Uuid) -> ResultEngine<payments::Model> {
        payments::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payment not exists".to_string()))
    }

    /// Deletes a payment. The owning day record stays; the next projection
    /// reflects the removal on its own.
    pub async fn delete_payment(&self, id: Uuid) -> ResultEngine<()> {
        let result = payments::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("payment not exists".to_string()));
        }
        Ok(())
    }

    /// Lists every recorded payment, newest first.
    pub async fn list_payments(&self) -> ResultEngine<Vec<payments::Model>> {
        Ok(payments::Entity::find()
            .order_by_desc(payments::Column::Date)
            .order_by_desc(payments::Column::CreatedAt)
            .all(&self.database)
            .await?)
    }
}
