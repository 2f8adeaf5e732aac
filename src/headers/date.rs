use chrono::{DateTime, NaiveDateTime, Utc};

/// The one accepted HTTP-date shape: RFC 1123 with a literal `GMT` suffix.
///
/// Obsolete RFC 850 and asctime forms are deliberately rejected; senders that still
/// emit them get a parse error rather than a silent guess.
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Typed default for absent date headers. Sorts before every real timestamp, so
/// freshness comparisons against it behave as "never".
pub const MIN_DATE: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Parse an HTTP-date header value against [`HTTP_DATE_FORMAT`].
///
/// `None` means the value is malformed; the caller decides whether that is an error
/// (present header) or irrelevant (no header at all). chrono verifies that the
/// weekday matches the calendar date, so `Mon, 06 Nov 1994 ...` is rejected.
pub(crate) fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc_1123_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT");
        let date = parsed.unwrap();
        assert_eq!(
            (date.year(), date.month(), date.day()),
            (1994, 11, 6),
            "calendar date"
        );
        assert_eq!(
            (date.hour(), date.minute(), date.second()),
            (8, 49, 37),
            "time of day"
        );
    }

    #[test]
    fn rejects_wrong_weekday() {
        // 1994-11-06 was a Sunday
        assert_eq!(parse_http_date("Mon, 06 Nov 1994 08:49:37 GMT"), None);
    }

    #[test]
    fn rejects_non_gmt_suffix() {
        assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 UTC"), None);
        assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 gmt"), None);
    }

    #[test]
    fn rejects_obsolete_formats() {
        // RFC 850
        assert_eq!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"), None);
        // asctime
        assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_http_date("not a date"), None);
        assert_eq!(parse_http_date(""), None);
    }
}
