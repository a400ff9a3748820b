//! A dated payment, owned by the day record of its date.
//!
//! Deleting a payment never touches the owning day row; the next projection
//! simply no longer sees it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashflow_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: Date,
    pub amount_minor: i64,
    pub recipient_name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::days::Entity",
        from = "Column::Date",
        to = "super::days::Column::Date",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Days,
}

impl Related<super::days::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Days.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
