//! Month projection: turns sparse day records into a full day-by-day ledger.
//!
//! The reconstruction is a forward recurrence with one lookback: a day's
//! ending balance feeds the next day's opening balance, while a day under
//! the shift policy reaches back and reduces the previous day's ending
//! balance. That mutual dependency is resolved with two sequential passes
//! over an indexed `Vec`, never with recursion:
//!
//! 1. materialize one provisional entry per calendar day, resolving each
//!    field through its precedence chain;
//! 2. walk the same order, finalize ending balances, apply shift
//!    adjustments against the previous entry and carry endings forward.
//!
//! Statuses are assigned once every balance is final, so a day later reduced
//! by a shifted payment is classified on what it actually ends with.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{Month, days, payments, settings};

/// Safety classification of a day's final ending balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DayStatus {
    Safe,
    Warning,
    Deficit,
}

impl DayStatus {
    /// Classifies an ending balance against the safety threshold.
    ///
    /// A balance exactly on the threshold is still `Safe`; zero is a
    /// `Warning` unless the threshold allows it.
    pub fn classify(ending_minor: i64, threshold_minor: i64) -> Self {
        if ending_minor >= threshold_minor {
            Self::Safe
        } else if ending_minor >= 0 {
            Self::Warning
        } else {
            Self::Deficit
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Deficit => "Deficit",
        }
    }
}

/// One payment as it appears inside a projected day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentLine {
    pub id: Uuid,
    pub amount_minor: i64,
    pub recipient_name: String,
    pub description: Option<String>,
}

impl From<&payments::Model> for PaymentLine {
    fn from(model: &payments::Model) -> Self {
        Self {
            id: model.id,
            amount_minor: model.amount_minor,
            recipient_name: model.recipient_name.clone(),
            description: model.description.clone(),
        }
    }
}

/// Fully resolved projection for one calendar day.
///
/// Derived on every read, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Full weekday name ("Sunday" .. "Saturday").
    pub weekday: String,
    pub sales_minor: i64,
    pub opening_cash_minor: i64,
    pub ending_cash_minor: i64,
    /// Payments shifted onto this day from the next day's records.
    pub tomorrow_payments_minor: i64,
    pub payments: Vec<PaymentLine>,
    pub total_payments_minor: i64,
    pub status: DayStatus,
    pub deduct_same_day: bool,
    pub is_opening_cash_manual: bool,
    pub use_default_sales: bool,
}

/// Sales precedence: the manual value once the default is switched off,
/// otherwise the global default.
fn resolve_sales(record: Option<&days::Model>, default_daily_sales_minor: i64) -> i64 {
    match record {
        Some(record) if !record.use_default_sales => record.sales_minor.unwrap_or(0),
        _ => default_daily_sales_minor,
    }
}

/// Opening-cash precedence at materialization time: the stored value when
/// present, zero otherwise. Carry-forward from the previous day happens in
/// the propagation pass and is blocked there by a manual pin.
fn resolve_opening_cash(record: Option<&days::Model>) -> i64 {
    record.and_then(|record| record.opening_cash_minor).unwrap_or(0)
}

/// Deduction policy: the stored flag, defaulting to same-day.
fn resolve_policy(record: Option<&days::Model>) -> bool {
    record.is_none_or(|record| record.deduct_same_day)
}

/// Reconstructs the ledger for `month` from sparse overrides.
///
/// Always yields exactly one entry per calendar day, ascending, with every
/// field resolved. Pure: reads nothing beyond its arguments and writes
/// nothing, so two calls over the same state are identical.
pub(crate) fn project(
    month: Month,
    settings: &settings::Model,
    days_by_date: &HashMap<NaiveDate, days::Model>,
    mut payments_by_date: HashMap<NaiveDate, Vec<payments::Model>>,
) -> Vec<DayEntry> {
    // Pass 1: one provisional entry per day. Ending balance and shifted
    // payments stay at 0 until propagation.
    let mut entries: Vec<DayEntry> = month
        .dates()
        .map(|date| {
            let record = days_by_date.get(&date);
            let payments: Vec<PaymentLine> = payments_by_date
                .remove(&date)
                .unwrap_or_default()
                .iter()
                .map(PaymentLine::from)
                .collect();
            let total_payments_minor = payments.iter().map(|payment| payment.amount_minor).sum();

            DayEntry {
                date,
                weekday: date.format("%A").to_string(),
                sales_minor: resolve_sales(record, settings.default_daily_sales_minor),
                opening_cash_minor: resolve_opening_cash(record),
                ending_cash_minor: 0,
                tomorrow_payments_minor: 0,
                payments,
                total_payments_minor,
                status: DayStatus::Safe,
                deduct_same_day: resolve_policy(record),
                is_opening_cash_manual: record.is_some_and(|r| r.is_opening_cash_manual),
                use_default_sales: record.is_none_or(|r| r.use_default_sales),
            }
        })
        .collect();

    // Pass 2: finalize balances in ascending order.
    for i in 0..entries.len() {
        let total_payments_minor = entries[i].total_payments_minor;

        let ending_cash_minor = if entries[i].deduct_same_day {
            entries[i].opening_cash_minor + entries[i].sales_minor - total_payments_minor
        } else {
            // Shift policy: this day's payments reduce the previous day's
            // already-final ending balance and show up there as tomorrow's
            // payments. On the first day of the month there is no previous
            // day and the shifted payments are dropped (intentional no-op,
            // no cross-month carry).
            if i > 0 {
                entries[i - 1].ending_cash_minor -= total_payments_minor;
                entries[i - 1].tomorrow_payments_minor = total_payments_minor;
            }
            entries[i].opening_cash_minor + entries[i].sales_minor
        };
        entries[i].ending_cash_minor = ending_cash_minor;

        // Carry-forward. The next day keeps this ending as its opening even
        // if a later shift reduces this day again; a manual pin blocks the
        // carry entirely.
        if i + 1 < entries.len() && !entries[i + 1].is_opening_cash_manual {
            entries[i + 1].opening_cash_minor = ending_cash_minor;
        }
    }

    for entry in &mut entries {
        entry.status = DayStatus::classify(entry.ending_cash_minor, settings.safety_threshold_minor);
    }

    entries
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn month(token: &str) -> Month {
        token.parse().unwrap()
    }

    fn date(token: &str) -> NaiveDate {
        token.parse().unwrap()
    }

    fn test_settings() -> settings::Model {
        settings::Model {
            id: 1,
            default_daily_sales_minor: 600_000,
            safety_threshold_minor: 200_000,
        }
    }

    fn day(token: &str) -> days::Model {
        days::Model {
            id: 0,
            date: date(token),
            opening_cash_minor: None,
            is_opening_cash_manual: false,
            sales_minor: None,
            manual_sales_minor: None,
            use_default_sales: true,
            deduct_same_day: true,
        }
    }

    fn payment(token: &str, amount_minor: i64) -> payments::Model {
        payments::Model {
            id: Uuid::new_v4(),
            date: date(token),
            amount_minor,
            recipient_name: "Fornitore".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn days_map(days: Vec<days::Model>) -> HashMap<NaiveDate, days::Model> {
        days.into_iter().map(|day| (day.date, day)).collect()
    }

    fn payments_map(payments: Vec<payments::Model>) -> HashMap<NaiveDate, Vec<payments::Model>> {
        let mut map: HashMap<NaiveDate, Vec<payments::Model>> = HashMap::new();
        for payment in payments {
            map.entry(payment.date).or_default().push(payment);
        }
        map
    }

    #[test]
    fn one_entry_per_day_ascending() {
        let entries = project(
            month("2026-02"),
            &test_settings(),
            &HashMap::new(),
            HashMap::new(),
        );

        assert_eq!(entries.len(), 28);
        assert_eq!(entries[0].date, date("2026-02-01"));
        assert_eq!(entries[27].date, date("2026-02-28"));
        assert!(entries.windows(2).all(|pair| pair[0].date < pair[1].date));

        let leap = project(
            month("2024-02"),
            &test_settings(),
            &HashMap::new(),
            HashMap::new(),
        );
        assert_eq!(leap.len(), 29);
    }

    #[test]
    fn zero_record_bootstrap() {
        let settings = test_settings();
        let entries = project(month("2026-03"), &settings, &HashMap::new(), HashMap::new());

        assert_eq!(entries[0].opening_cash_minor, 0);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.sales_minor, settings.default_daily_sales_minor);
            assert_eq!(entry.total_payments_minor, 0);
            assert!(entry.payments.is_empty());
            assert!(entry.deduct_same_day);
            assert!(entry.use_default_sales);
            assert!(!entry.is_opening_cash_manual);
            if i > 0 {
                assert_eq!(entry.opening_cash_minor, entries[i - 1].ending_cash_minor);
            }
            assert_eq!(
                entry.ending_cash_minor,
                entry.opening_cash_minor + settings.default_daily_sales_minor
            );
            assert_eq!(entry.status, DayStatus::Safe);
        }
    }

    #[test]
    fn weekday_names_are_full() {
        let entries = project(
            month("2026-08"),
            &test_settings(),
            &HashMap::new(),
            HashMap::new(),
        );
        // 2026-08-01 is a Saturday.
        assert_eq!(entries[0].weekday, "Saturday");
        assert_eq!(entries[1].weekday, "Sunday");
    }

    #[test]
    fn manual_sales_override_default() {
        let mut record = day("2026-03-02");
        record.use_default_sales = false;
        record.sales_minor = Some(150_000);
        record.manual_sales_minor = Some(150_000);

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![record]),
            HashMap::new(),
        );

        assert_eq!(entries[1].sales_minor, 150_000);
        assert!(!entries[1].use_default_sales);
        assert_eq!(entries[0].sales_minor, 600_000);
    }

    #[test]
    fn pinned_opening_cash_blocks_carry() {
        let mut pinned = day("2026-03-03");
        pinned.opening_cash_minor = Some(100);
        pinned.is_opening_cash_manual = true;

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![pinned]),
            HashMap::new(),
        );

        // Day 2 ends at 1_200_000; the pin on day 3 ignores that.
        assert_eq!(entries[1].ending_cash_minor, 1_200_000);
        assert_eq!(entries[2].opening_cash_minor, 100);
        assert!(entries[2].is_opening_cash_manual);
        // Day 4 carries from the pinned day's ending again.
        assert_eq!(entries[3].opening_cash_minor, entries[2].ending_cash_minor);
    }

    #[test]
    fn unpinned_opening_value_feeds_first_day_only() {
        let mut first = day("2026-03-01");
        first.opening_cash_minor = Some(50_000);

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![first]),
            HashMap::new(),
        );

        assert_eq!(entries[0].opening_cash_minor, 50_000);
        assert!(!entries[0].is_opening_cash_manual);
        assert_eq!(entries[1].opening_cash_minor, entries[0].ending_cash_minor);
    }

    #[test]
    fn same_day_policy_deducts_from_own_ending() {
        let mut first = day("2026-03-01");
        first.opening_cash_minor = Some(100_000);
        first.is_opening_cash_manual = true;

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![first]),
            payments_map(vec![payment("2026-03-01", 200_000)]),
        );

        assert_eq!(entries[0].total_payments_minor, 200_000);
        assert_eq!(entries[0].ending_cash_minor, 100_000 + 600_000 - 200_000);
        assert_eq!(entries[0].tomorrow_payments_minor, 0);
    }

    #[test]
    fn shift_policy_reduces_previous_day() {
        let mut shifted = day("2026-03-02");
        shifted.deduct_same_day = false;

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![shifted]),
            payments_map(vec![payment("2026-03-02", 150_000)]),
        );

        // Day 1 ends at 600_000 before the adjustment.
        assert_eq!(entries[0].ending_cash_minor, 600_000 - 150_000);
        assert_eq!(entries[0].tomorrow_payments_minor, 150_000);
        // Day 2 carried the pre-adjustment ending and excludes its own
        // payments.
        assert_eq!(entries[1].opening_cash_minor, 600_000);
        assert_eq!(entries[1].ending_cash_minor, 600_000 + 600_000);
        assert_eq!(entries[1].tomorrow_payments_minor, 0);
    }

    #[test]
    fn shift_on_first_day_is_a_noop() {
        let mut first = day("2026-03-01");
        first.deduct_same_day = false;

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![first]),
            payments_map(vec![payment("2026-03-01", 150_000)]),
        );

        // No previous day exists: nothing is reduced anywhere.
        assert_eq!(entries[0].ending_cash_minor, 600_000);
        assert_eq!(entries[0].total_payments_minor, 150_000);
        assert!(entries.iter().all(|e| e.tomorrow_payments_minor == 0));
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(DayStatus::classify(200_000, 200_000), DayStatus::Safe);
        assert_eq!(DayStatus::classify(200_001, 200_000), DayStatus::Safe);
        assert_eq!(DayStatus::classify(199_999, 200_000), DayStatus::Warning);
        assert_eq!(DayStatus::classify(0, 200_000), DayStatus::Warning);
        assert_eq!(DayStatus::classify(0, 0), DayStatus::Safe);
        assert_eq!(DayStatus::classify(-1, 200_000), DayStatus::Deficit);
    }

    #[test]
    fn shifted_payment_reclassifies_previous_day() {
        // Day 1: manual opening 5000.00, one same-day payment of 1000.00.
        let mut first = day("2026-03-01");
        first.opening_cash_minor = Some(500_000);
        first.is_opening_cash_manual = true;

        // Day 2: one payment of 9000.00, deducted from the previous day.
        let mut second = day("2026-03-02");
        second.deduct_same_day = false;

        let entries = project(
            month("2026-03"),
            &test_settings(),
            &days_map(vec![first, second]),
            payments_map(vec![
                payment("2026-03-01", 100_000),
                payment("2026-03-02", 900_000),
            ]),
        );

        // Day 1: 5000 + 6000 - 1000 = 10000, then 9000 shifted back onto it.
        assert_eq!(entries[0].opening_cash_minor, 500_000);
        assert_eq!(entries[0].sales_minor, 600_000);
        assert_eq!(entries[0].total_payments_minor, 100_000);
        assert_eq!(entries[0].ending_cash_minor, 100_000);
        assert_eq!(entries[0].tomorrow_payments_minor, 900_000);
        assert_eq!(entries[0].status, DayStatus::Warning);

        // Day 2 carried 10000 before the adjustment was applied to day 1.
        assert_eq!(entries[1].opening_cash_minor, 1_000_000);
        assert_eq!(entries[1].ending_cash_minor, 1_600_000);
        assert_eq!(entries[1].status, DayStatus::Safe);

        // Day 3 carries day 2's ending.
        assert_eq!(entries[2].opening_cash_minor, 1_600_000);
    }

    #[test]
    fn projection_is_idempotent() {
        let mut record = day("2026-03-05");
        record.deduct_same_day = false;
        let days = days_map(vec![record]);
        let payments = payments_map(vec![payment("2026-03-05", 70_000)]);

        let first = project(month("2026-03"), &test_settings(), &days, payments.clone());
        let second = project(month("2026-03"), &test_settings(), &days, payments);

        assert_eq!(first, second);
    }
}
