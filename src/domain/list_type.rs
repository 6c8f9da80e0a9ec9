//! List Type
//!
//! Determines how (and whether) a checklist auto-resets.

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

/// Type of checklist list, determining reset behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Resets every calendar day
    Daily,
    /// Resets every ISO week
    Weekly,
    /// Resets every calendar month
    Monthly,
    /// Never resets
    #[default]
    Custom,
}

/// Calendar granularity at which a list is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPeriod {
    Day,
    Week,
    Month,
}

impl ListType {
    pub const ALL: [ListType; 4] = [
        ListType::Daily,
        ListType::Weekly,
        ListType::Monthly,
        ListType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Daily => "daily",
            ListType::Weekly => "weekly",
            ListType::Monthly => "monthly",
            ListType::Custom => "custom",
        }
    }

    /// Parse a stored raw value. Unknown values fall back to `Custom`,
    /// which never resets.
    pub fn from_str(s: &str) -> Self {
        match s {
            "daily" => ListType::Daily,
            "weekly" => ListType::Weekly,
            "monthly" => ListType::Monthly,
            _ => ListType::Custom,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ListType::Daily => "Daily",
            ListType::Weekly => "Weekly",
            ListType::Monthly => "Monthly",
            ListType::Custom => "Custom",
        }
    }

    pub fn supports_auto_reset(&self) -> bool {
        self.reset_period().is_some()
    }

    pub fn reset_period(&self) -> Option<ResetPeriod> {
        match self {
            ListType::Daily => Some(ResetPeriod::Day),
            ListType::Weekly => Some(ResetPeriod::Week),
            ListType::Monthly => Some(ResetPeriod::Month),
            ListType::Custom => None,
        }
    }
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResetPeriod {
    /// Whether both instants fall into the same period of the calendar
    /// they are expressed in.
    ///
    /// Weeks are ISO weeks (Monday start), compared together with their
    /// ISO year so week 1 of one year never matches week 1 of another.
    pub fn same_period<Tz: TimeZone>(&self, a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
        match self {
            ResetPeriod::Day => a.date_naive() == b.date_naive(),
            ResetPeriod::Week => a.iso_week() == b.iso_week(),
            ResetPeriod::Month => a.year() == b.year() && a.month() == b.month(),
        }
    }
}

/// Decide whether a list of `list_type`, last reset at `last_reset`, is due
/// for a reset at `now`. Both instants are compared in `tz`.
pub fn is_reset_due<Tz: TimeZone, T: TimeZone>(
    list_type: ListType,
    last_reset: Option<&DateTime<T>>,
    now: &DateTime<T>,
    tz: &Tz,
) -> bool {
    let Some(period) = list_type.reset_period() else {
        return false;
    };
    let Some(last_reset) = last_reset else {
        return true;
    };
    !period.same_period(&last_reset.with_timezone(tz), &now.with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_list_type_raw_values() {
        for list_type in ListType::ALL {
            assert_eq!(ListType::from_str(list_type.as_str()), list_type);
        }
        assert_eq!(ListType::from_str("shopping"), ListType::Custom);
        assert_eq!(ListType::Weekly.display_name(), "Weekly");
        assert_eq!(ListType::default(), ListType::Custom);
    }

    #[test]
    fn test_list_type_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&ListType::Monthly).unwrap(), "\"monthly\"");
        let parsed: ListType = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, ListType::Daily);
        assert!(serde_json::from_str::<ListType>("\"yearly\"").is_err());
    }

    #[test]
    fn test_only_custom_skips_auto_reset() {
        assert!(ListType::Daily.supports_auto_reset());
        assert!(ListType::Weekly.supports_auto_reset());
        assert!(ListType::Monthly.supports_auto_reset());
        assert!(!ListType::Custom.supports_auto_reset());
        assert_eq!(ListType::Custom.reset_period(), None);
    }

    #[test]
    fn test_custom_never_due() {
        let now = utc(2026, 3, 10, 12, 0);
        let long_ago = utc(2001, 1, 1, 0, 0);
        assert!(!is_reset_due(ListType::Custom, None, &now, &Utc));
        assert!(!is_reset_due(ListType::Custom, Some(&long_ago), &now, &Utc));
    }

    #[test]
    fn test_never_reset_is_due() {
        let now = utc(2026, 3, 10, 12, 0);
        assert!(is_reset_due(ListType::Daily, None, &now, &Utc));
        assert!(is_reset_due(ListType::Monthly, None, &now, &Utc));
    }

    #[test]
    fn test_daily_day_boundary() {
        let yesterday_late = utc(2026, 3, 9, 23, 59);
        let today_early = utc(2026, 3, 10, 0, 1);
        let today_late = utc(2026, 3, 10, 23, 58);

        assert!(is_reset_due(ListType::Daily, Some(&yesterday_late), &today_early, &Utc));
        assert!(!is_reset_due(ListType::Daily, Some(&today_early), &today_late, &Utc));
    }

    #[test]
    fn test_daily_uses_calendar_timezone() {
        // 22:30 UTC and 23:30 UTC are the same UTC day but straddle
        // midnight at UTC+1
        let a = utc(2026, 3, 9, 22, 30);
        let b = utc(2026, 3, 9, 23, 30);
        let plus_one = FixedOffset::east_opt(3600).unwrap();

        assert!(!is_reset_due(ListType::Daily, Some(&a), &b, &Utc));
        assert!(is_reset_due(ListType::Daily, Some(&a), &b, &plus_one));
    }

    #[test]
    fn test_weekly_iso_weeks() {
        // 2026-03-09 is a Monday
        let sunday = utc(2026, 3, 8, 20, 0);
        let monday = utc(2026, 3, 9, 8, 0);
        let friday = utc(2026, 3, 13, 18, 0);

        assert!(is_reset_due(ListType::Weekly, Some(&sunday), &monday, &Utc));
        assert!(!is_reset_due(ListType::Weekly, Some(&monday), &friday, &Utc));
    }

    #[test]
    fn test_weekly_same_week_number_other_year() {
        let last_year = utc(2025, 3, 12, 8, 0);
        let this_year = utc(2026, 3, 11, 8, 0);
        assert_eq!(last_year.iso_week().week(), this_year.iso_week().week());
        assert!(is_reset_due(ListType::Weekly, Some(&last_year), &this_year, &Utc));
    }

    #[test]
    fn test_weekly_across_new_year() {
        // Both fall in ISO week 2026-W01
        let new_years_eve = utc(2025, 12, 31, 9, 0);
        let new_year = utc(2026, 1, 1, 9, 0);
        assert!(!is_reset_due(ListType::Weekly, Some(&new_years_eve), &new_year, &Utc));
    }

    #[test]
    fn test_monthly_year_and_month() {
        let start = utc(2026, 3, 1, 0, 0);
        let end = utc(2026, 3, 31, 23, 59);
        let next_month = utc(2026, 4, 1, 0, 0);
        let next_year = utc(2027, 3, 15, 0, 0);

        assert!(!is_reset_due(ListType::Monthly, Some(&start), &end, &Utc));
        assert!(is_reset_due(ListType::Monthly, Some(&end), &next_month, &Utc));
        assert!(is_reset_due(ListType::Monthly, Some(&start), &next_year, &Utc));
    }
}
