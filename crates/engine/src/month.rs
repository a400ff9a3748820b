//! Month token (`YYYY-MM`) and its calendar helpers.
use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};

use crate::{EngineError, ResultEngine};

/// A calendar month, the unit the projection operates on.
///
/// The first and last day are resolved at construction, so every accessor
/// afterwards is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Month {
    year: i32,
    month: u32,
    first: NaiveDate,
    last: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        let invalid = || EngineError::InvalidDate(format!("invalid month: {year}-{month:02}"));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next_first
            .and_then(|date| date.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first,
            last,
        })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.last
    }

    /// Number of calendar days in the month.
    pub fn num_days(self) -> u32 {
        self.last.day()
    }

    /// Every date of the month, ascending.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.num_days() as usize)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parses a `YYYY-MM` token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate(format!("invalid month token: {s:?}"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Month::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token() {
        let month: Month = "2026-08".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 8);
        assert_eq!(month.to_string(), "2026-08");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("".parse::<Month>().is_err());
        assert!("2026".parse::<Month>().is_err());
        assert!("2026-13".parse::<Month>().is_err());
        assert!("2026-00".parse::<Month>().is_err());
        assert!("garbage".parse::<Month>().is_err());
    }

    #[test]
    fn knows_month_lengths() {
        assert_eq!("2026-01".parse::<Month>().unwrap().num_days(), 31);
        assert_eq!("2026-04".parse::<Month>().unwrap().num_days(), 30);
        assert_eq!("2026-02".parse::<Month>().unwrap().num_days(), 28);
        assert_eq!("2024-02".parse::<Month>().unwrap().num_days(), 29);
        assert_eq!("2026-12".parse::<Month>().unwrap().num_days(), 31);
    }

    #[test]
    fn date_range_covers_whole_month() {
        let month: Month = "2026-02".parse().unwrap();
        let dates: Vec<_> = month.dates().collect();
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], month.first_day());
        assert_eq!(dates[27], month.last_day());
    }
}
