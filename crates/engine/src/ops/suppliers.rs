//! Supplier directory, as far as the payment echo needs it.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use super::{Engine, normalize_required_name};
use crate::{EngineError, ResultEngine, supplier_notes, suppliers};

impl Engine {
    /// Registers a supplier.
    pub async fn new_supplier(&self, name: &str, phone: &str) -> ResultEngine<suppliers::Model> {
        let name = normalize_required_name(name, "supplier")?;
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(EngineError::InvalidName(
                "supplier phone must not be empty".to_string(),
            ));
        }

        let supplier = suppliers::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name),
            phone: ActiveValue::Set(phone.to_string()),
        };
        Ok(supplier.insert(&self.database).await?)
    }

    /// Lists all suppliers, by name.
    pub async fn suppliers(&self) -> ResultEngine<Vec<suppliers::Model>> {
        Ok(suppliers::Entity::find()
            .order_by_asc(suppliers::Column::Name)
            .all(&self.database)
            .await?)
    }

    /// Lists the audit notes mirrored onto one supplier, newest first.
    pub async fn supplier_notes(
        &self,
        supplier_id: Uuid,
    ) -> ResultEngine<Vec<supplier_notes::Model>> {
        suppliers::Entity::find_by_id(supplier_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("supplier not exists".to_string()))?;

        Ok(supplier_notes::Entity::find()
            .filter(supplier_notes::Column::SupplierId.eq(supplier_id))
            .order_by_desc(supplier_notes::Column::Date)
            .all(&self.database)
            .await?)
    }
}
