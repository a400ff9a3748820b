//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: authentication
//! - `cashflow_settings`: global defaults (single row)
//! - `cashflow_days`: sparse per-date overrides for the ledger
//! - `cashflow_payments`: dated payments, owned by a day via `date`
//! - `suppliers`: supplier directory
//! - `supplier_cashflow_notes`: audit echo of payments onto suppliers

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum CashflowSettings {
    Table,
    Id,
    DefaultDailySalesMinor,
    SafetyThresholdMinor,
}

#[derive(Iden)]
enum CashflowDays {
    Table,
    Id,
    Date,
    OpeningCashMinor,
    IsOpeningCashManual,
    SalesMinor,
    ManualSalesMinor,
    UseDefaultSales,
    DeductSameDay,
}

#[derive(Iden)]
enum CashflowPayments {
    Table,
    Id,
    Date,
    AmountMinor,
    RecipientName,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Name,
    Phone,
}

#[derive(Iden)]
enum SupplierCashflowNotes {
    Table,
    Id,
    SupplierId,
    PaymentId,
    AmountMinor,
    RecipientName,
    Date,
    Description,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Cashflow settings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CashflowSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashflowSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CashflowSettings::DefaultDailySalesMinor)
                            .big_integer()
                            .not_null()
                            .default(600_000),
                    )
                    .col(
                        ColumnDef::new(CashflowSettings::SafetyThresholdMinor)
                            .big_integer()
                            .not_null()
                            .default(200_000),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Cashflow days
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CashflowDays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashflowDays::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CashflowDays::Date)
                            .date()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CashflowDays::OpeningCashMinor).big_integer())
                    .col(
                        ColumnDef::new(CashflowDays::IsOpeningCashManual)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CashflowDays::SalesMinor).big_integer())
                    .col(ColumnDef::new(CashflowDays::ManualSalesMinor).big_integer())
                    .col(
                        ColumnDef::new(CashflowDays::UseDefaultSales)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CashflowDays::DeductSameDay)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Cashflow payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CashflowPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashflowPayments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CashflowPayments::Date).date().not_null())
                    .col(
                        ColumnDef::new(CashflowPayments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashflowPayments::RecipientName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashflowPayments::Description).text())
                    .col(
                        ColumnDef::new(CashflowPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cashflow_payments-date")
                            .from(CashflowPayments::Table, CashflowPayments::Date)
                            .to(CashflowDays::Table, CashflowDays::Date),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cashflow_payments-date")
                    .table(CashflowPayments::Table)
                    .col(CashflowPayments::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Suppliers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suppliers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::Phone).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Supplier cashflow notes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SupplierCashflowNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplierCashflowNotes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupplierCashflowNotes::SupplierId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierCashflowNotes::PaymentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierCashflowNotes::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierCashflowNotes::RecipientName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplierCashflowNotes::Date).date().not_null())
                    .col(ColumnDef::new(SupplierCashflowNotes::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-supplier_cashflow_notes-supplier_id")
                            .from(
                                SupplierCashflowNotes::Table,
                                SupplierCashflowNotes::SupplierId,
                            )
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupplierCashflowNotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashflowPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashflowDays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashflowSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
