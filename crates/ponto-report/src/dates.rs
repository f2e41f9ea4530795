//! Report period computation.

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// The calendar range covered by one report export.
///
/// The end is always yesterday. When yesterday was a Sunday the start slides
/// back one extra day so the Monday run still covers the weekend window;
/// otherwise start and end coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Period for a run happening on `today`.
    pub fn for_today(today: NaiveDate) -> Self {
        let end = today - Days::new(1);
        let start = if end.weekday() == Weekday::Sun {
            end - Days::new(1)
        } else {
            end
        };
        Self { start, end }
    }

    /// Period for a run happening now, in local time.
    pub fn current() -> Self {
        Self::for_today(Local::now().date_naive())
    }

    /// Render the period for the portal's date-range input.
    pub fn to_range_string(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_range_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_period_is_a_single_day() {
        // Wednesday run covers Tuesday only.
        let period = ReportPeriod::for_today(date(2024, 6, 12));
        assert_eq!(period.start, date(2024, 6, 11));
        assert_eq!(period.end, date(2024, 6, 11));
    }

    #[test]
    fn monday_period_starts_on_saturday() {
        // Monday run: yesterday is Sunday, so the start is pushed back a day.
        let today = date(2024, 6, 10);
        assert_eq!(today.weekday(), Weekday::Mon);

        let period = ReportPeriod::for_today(today);
        assert_eq!(period.end, date(2024, 6, 9));
        assert_eq!(period.start, date(2024, 6, 8));
        assert_eq!(period.start, today - Days::new(2));
    }

    #[test]
    fn sunday_period_is_saturday_only() {
        // Sunday run: yesterday is a plain Saturday, no pushback.
        let period = ReportPeriod::for_today(date(2024, 6, 9));
        assert_eq!(period.start, date(2024, 6, 8));
        assert_eq!(period.end, date(2024, 6, 8));
    }

    #[test]
    fn range_string_uses_portal_format() {
        let period = ReportPeriod {
            start: date(2024, 6, 8),
            end: date(2024, 6, 9),
        };
        assert_eq!(period.to_range_string(), "08/06/2024 - 09/06/2024");
        assert_eq!(period.to_string(), period.to_range_string());
    }
}
