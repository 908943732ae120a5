use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Truncate to the top of the hour. Bookings only ever occupy
/// whole-hour slots, so minutes and anything finer are dropped on the
/// way in.
pub fn start_of_hour(date: DateTime<Utc>) -> DateTime<Utc> {
    date.with_minute(0)
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}

/// First and last instant of the UTC day containing `date`.
pub fn day_bounds(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = date.date_naive();
    let start = day.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end = day.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc();
    (start, end)
}

/// Parse a query-string date. Accepts a full RFC 3339 instant or a bare
/// `YYYY-MM-DD`, which reads as UTC midnight.
pub fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_of_hour_drops_minutes_and_seconds() {
        let date = Utc.with_ymd_and_hms(2025, 6, 22, 13, 47, 31).unwrap();
        let truncated = start_of_hour(date);

        assert_eq!(truncated, Utc.with_ymd_and_hms(2025, 6, 22, 13, 0, 0).unwrap());
    }

    #[test]
    fn start_of_hour_keeps_exact_hours() {
        let date = Utc.with_ymd_and_hms(2025, 6, 22, 13, 0, 0).unwrap();
        assert_eq!(start_of_hour(date), date);
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = Utc.with_ymd_and_hms(2025, 6, 22, 13, 47, 31).unwrap();
        let (start, end) = day_bounds(date);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 22, 0, 0, 0).unwrap());
        assert!(end > Utc.with_ymd_and_hms(2025, 6, 22, 23, 59, 58).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2025, 6, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_iso_date_accepts_instants_and_bare_days() {
        let instant = parse_iso_date("2025-06-22T13:47:31-03:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 6, 22, 16, 47, 31).unwrap());

        let midnight = parse_iso_date("2025-06-22").unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2025, 6, 22, 0, 0, 0).unwrap());

        assert!(parse_iso_date("not-a-date").is_none());
    }
}
