use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod settings {
    use super::*;

    /// Global cash-flow settings. Amounts are integer cents.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettingsView {
        pub default_daily_sales_minor: i64,
        pub safety_threshold_minor: i64,
    }

    /// Partial settings update; absent fields keep their value.
    ///
    /// The safety threshold may be set below zero.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettingsUpdate {
        pub default_daily_sales_minor: Option<i64>,
        pub safety_threshold_minor: Option<i64>,
    }
}

pub mod cashflow {
    use super::*;

    /// Safety classification of a projected day.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum DayStatus {
        Safe,
        Warning,
        Deficit,
    }

    /// One recorded payment.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub amount_minor: i64,
        pub recipient_name: String,
        pub description: Option<String>,
    }

    /// Fully resolved projection for one calendar day.
    ///
    /// Derived on every read; nothing in here is persisted.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayEntryView {
        pub date: NaiveDate,
        /// Full weekday name ("Sunday" .. "Saturday").
        pub weekday: String,
        pub sales_minor: i64,
        pub opening_cash_minor: i64,
        pub ending_cash_minor: i64,
        /// Payments shifted onto this day from the next day's records.
        pub tomorrow_payments_minor: i64,
        pub payments: Vec<PaymentView>,
        pub total_payments_minor: i64,
        pub status: DayStatus,
        pub deduct_same_day: bool,
        pub is_opening_cash_manual: bool,
        pub use_default_sales: bool,
    }

    /// Persisted sparse override state for one date.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayRecordView {
        pub date: NaiveDate,
        pub opening_cash_minor: Option<i64>,
        pub is_opening_cash_manual: bool,
        pub sales_minor: Option<i64>,
        pub use_default_sales: bool,
        pub deduct_same_day: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OpeningCashNew {
        pub date: NaiveDate,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesNew {
        pub date: NaiveDate,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub date: NaiveDate,
        pub amount_minor: i64,
        pub recipient_name: String,
        pub description: Option<String>,
    }

    /// Partial policy update for one day.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DaySettingsUpdate {
        pub deduct_same_day: Option<bool>,
        pub sales_minor: Option<i64>,
    }

    /// Confirmation of a month reset.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthReset {
        pub month: String,
    }
}

pub mod supplier {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplierNew {
        pub name: String,
        pub phone: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplierView {
        pub id: Uuid,
        pub name: String,
        pub phone: String,
    }

    /// Audit note mirrored from a cash-flow payment onto a supplier.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashflowNoteView {
        pub id: Uuid,
        pub payment_id: Uuid,
        pub amount_minor: i64,
        pub recipient_name: String,
        pub date: NaiveDate,
        pub description: Option<String>,
    }
}
