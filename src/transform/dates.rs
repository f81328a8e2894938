use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Datetime layouts the API emits without a zone offset. `dataHora` fields
/// carry minute precision; archive exports sometimes include seconds.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an upstream timestamp permissively.
///
/// Accepts ISO-8601 with a zone offset, the offset-less layouts in
/// [`NAIVE_FORMATS`], and bare `YYYY-MM-DD` dates (taken as midnight).
/// Offset-less values are assumed UTC so every result is mutually
/// comparable. Empty or malformed input is `None`, never an error.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

/// Whole days elapsed from `date` to now. Negative for future dates.
pub fn days_since(date: DateTime<Utc>) -> i64 {
    (Utc::now().date_naive() - date.date_naive()).num_days()
}
