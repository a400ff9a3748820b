//! Per-date sparse override record.
//!
//! A row exists only once something was written for that date (opening cash,
//! sales, a payment or a policy change). Dates without a row project to
//! defaults. `is_opening_cash_manual` pins the opening balance: the
//! projection never overwrites a pinned value with a carried one.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashflow_days")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub date: Date,
    pub opening_cash_minor: Option<i64>,
    pub is_opening_cash_manual: bool,
    pub sales_minor: Option<i64>,
    pub manual_sales_minor: Option<i64>,
    pub use_default_sales: bool,
    pub deduct_same_day: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
