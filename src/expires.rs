//! Normalization of cookie expiration dates into HTTP-dates.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{
        BorrowedFormatItem,
        well_known::{Rfc2822, Rfc3339},
    },
    macros::format_description,
};

/// Rendered in place of an HTTP-date when a textual expiration cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

// The weekday is stripped before parsing; browsers do not check it.
const HTTP_DATE_NO_WEEKDAY: &[BorrowedFormatItem<'static>] = format_description!(
    "[day padding:none] [month repr:short case_sensitive:false] [year] [hour]:[minute]:[second] GMT"
);

// `Date.prototype.toString()` without the weekday or the trailing `(zone name)`.
const JS_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day] [year] [hour]:[minute]:[second] GMT[offset_hour sign:mandatory][offset_minute]"
);

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// When a cookie expires: either free text to be parsed as a date, or a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiration {
    Text(String),
    At(OffsetDateTime),
}

impl From<&str> for Expiration {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Expiration {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<OffsetDateTime> for Expiration {
    fn from(value: OffsetDateTime) -> Self {
        Self::At(value)
    }
}

/// Convert an expiration into the HTTP-date used by the `expires` attribute.
///
/// Returns `None` when there is nothing to render. Text that does not parse as a
/// date renders as [`INVALID_DATE`] rather than failing.
pub fn expires(expiration: Option<&Expiration>) -> Option<String> {
    match expiration? {
        Expiration::Text(text) if text.is_empty() => None,
        Expiration::Text(text) => Some(match parse_date(text) {
            Some(at) => http_date(at),
            None => {
                tracing::warn!(expiration = %text, "unparseable cookie expiration date");
                INVALID_DATE.to_owned()
            }
        }),
        Expiration::At(at) => Some(http_date(*at)),
    }
}

/// Format a point in time as an HTTP-date in UTC, e.g. `Thu, 01 Jan 1970 00:00:01 GMT`.
pub fn http_date(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(HTTP_DATE)
        .unwrap_or_else(|_| INVALID_DATE.to_owned())
}

fn parse_date(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    let without_weekday = text.split_once(',').map_or(text, |(_, rest)| rest.trim());
    if let Ok(at) = PrimitiveDateTime::parse(without_weekday, HTTP_DATE_NO_WEEKDAY) {
        return Some(at.assume_utc());
    }

    if let Ok(at) = OffsetDateTime::parse(text, &Rfc2822) {
        return Some(at);
    }

    if let Ok(at) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(at);
    }

    let js_date = text.split_once(" (").map_or(text, |(date, _)| date);
    let js_date = js_date.split_once(' ').map_or(js_date, |(_, rest)| rest);
    if let Ok(at) = OffsetDateTime::parse(js_date, JS_DATE) {
        return Some(at);
    }

    Date::parse(text, ISO_DATE)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn absent_expiration_renders_nothing() {
        assert_eq!(expires(None), None);
        assert_eq!(expires(Some(&Expiration::from(""))), None);
    }

    #[test]
    fn http_date_text_is_normalized() {
        let exp = Expiration::from("Tue, 13 Aug 2119 10:29:45 GMT");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Sun, 13 Aug 2119 10:29:45 GMT")
        );

        let exp = Expiration::from("Thu, 01 Jan 1970 00:00:01 GMT");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Thu, 01 Jan 1970 00:00:01 GMT")
        );
    }

    #[test]
    fn offset_text_is_converted_to_utc() {
        let exp = Expiration::from("2024-03-01T12:00:00+02:00");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Fri, 01 Mar 2024 10:00:00 GMT")
        );

        let exp = Expiration::from("Fri, 01 Mar 2024 12:00:00 +0200");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Fri, 01 Mar 2024 10:00:00 GMT")
        );
    }

    #[test]
    fn javascript_date_string_is_converted_to_utc() {
        let exp = Expiration::from("Fri Mar 01 2024 12:00:00 GMT+0200 (Eastern European Standard Time)");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Fri, 01 Mar 2024 10:00:00 GMT")
        );

        let exp = Expiration::from("Thu Feb 29 2024 23:30:00 GMT-0100");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Fri, 01 Mar 2024 00:30:00 GMT")
        );
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let exp = Expiration::from("2024-03-01");
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Fri, 01 Mar 2024 00:00:00 GMT")
        );
    }

    #[test]
    fn unparseable_text_renders_invalid_date() {
        let exp = Expiration::from("next tuesday-ish");
        assert_eq!(expires(Some(&exp)).as_deref(), Some(INVALID_DATE));
    }

    #[test]
    fn point_in_time_is_formatted_in_utc() {
        let exp = Expiration::from(datetime!(2030-06-15 23:30:00 -01:00));
        assert_eq!(
            expires(Some(&exp)).as_deref(),
            Some("Sun, 16 Jun 2030 00:30:00 GMT")
        );
    }
}
