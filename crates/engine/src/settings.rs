//! Global cash-flow settings: a single row, lazily created with defaults.

use sea_orm::entity::prelude::*;

/// Daily sales assumed for a day without a manual value: 6000.00.
pub const DEFAULT_DAILY_SALES_MINOR: i64 = 600_000;

/// Ending balances below this are flagged as a warning: 2000.00.
pub const DEFAULT_SAFETY_THRESHOLD_MINOR: i64 = 200_000;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cashflow_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub default_daily_sales_minor: i64,
    pub safety_threshold_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
