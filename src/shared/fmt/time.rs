//! Rendering provider timestamps in Kyiv local time.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

const EET_OFFSET_SECS: i32 = 2 * 3600;
const EEST_OFFSET_SECS: i32 = 3 * 3600;

/// Render an RFC 3339 timestamp as `dd.mm.yyyy HH:MM:SS (EET|EEST)`.
///
/// Input that does not parse is returned verbatim.
pub fn kyiv_time(timestamp: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp.trim()) else {
        return timestamp.to_string();
    };
    let utc = parsed.with_timezone(&Utc);

    let (secs, abbr) = if is_summer_time(utc) {
        (EEST_OFFSET_SECS, "EEST")
    } else {
        (EET_OFFSET_SECS, "EET")
    };
    match FixedOffset::east_opt(secs) {
        Some(offset) => format!(
            "{} ({})",
            utc.with_timezone(&offset).format("%d.%m.%Y %H:%M:%S"),
            abbr
        ),
        None => timestamp.to_string(),
    }
}

/// EU rule: summer time runs from 01:00 UTC on the last Sunday of March
/// until 01:00 UTC on the last Sunday of October.
fn is_summer_time(utc: DateTime<Utc>) -> bool {
    let year = utc.year();
    match (switch_instant(year, 3), switch_instant(year, 10)) {
        (Some(start), Some(end)) => utc >= start && utc < end,
        _ => false,
    }
}

fn switch_instant(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?;
    let back = last_day.weekday().num_days_from_sunday() as i64;
    let sunday = last_day - Duration::days(back);
    Some(sunday.and_hms_opt(1, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_time() {
        assert_eq!(
            kyiv_time("2024-01-15T10:00:00.0000000Z"),
            "15.01.2024 12:00:00 (EET)"
        );
    }

    #[test]
    fn test_summer_time() {
        assert_eq!(kyiv_time("2024-07-01T10:00:00Z"), "01.07.2024 13:00:00 (EEST)");
    }

    #[test]
    fn test_spring_switch_boundary() {
        // Last Sunday of March 2024 is the 31st.
        assert_eq!(kyiv_time("2024-03-31T00:59:59Z"), "31.03.2024 02:59:59 (EET)");
        assert_eq!(kyiv_time("2024-03-31T01:00:00Z"), "31.03.2024 04:00:00 (EEST)");
    }

    #[test]
    fn test_autumn_switch_boundary() {
        // Last Sunday of October 2024 is the 27th.
        assert_eq!(kyiv_time("2024-10-27T00:59:59Z"), "27.10.2024 03:59:59 (EEST)");
        assert_eq!(kyiv_time("2024-10-27T01:00:00Z"), "27.10.2024 03:00:00 (EET)");
    }

    #[test]
    fn test_unparsable_passthrough() {
        assert_eq!(kyiv_time("yesterday"), "yesterday");
        assert_eq!(kyiv_time(""), "");
    }
}
