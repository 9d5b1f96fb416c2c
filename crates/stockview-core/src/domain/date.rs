use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::ValidationError;

const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const US_DATE: &[FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
const NAIVE_DATETIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const OFFSET_DATETIME: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

/// Parse the date portion of a price-file timestamp.
///
/// Timestamps that carry an offset keep their local calendar date; exported
/// exchange data is written in exchange time and shifting it to UTC would
/// move bars onto the wrong session.
pub fn parse_trading_date(input: &str) -> Result<Date, ValidationError> {
    let value = input.trim();

    if let Ok(date) = Date::parse(value, DATE_ONLY) {
        return Ok(date);
    }
    if let Ok(datetime) = OffsetDateTime::parse(value, OFFSET_DATETIME) {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = PrimitiveDateTime::parse(value, NAIVE_DATETIME) {
        return Ok(datetime.date());
    }
    if let Ok(date) = Date::parse(value, US_DATE) {
        return Ok(date);
    }

    Err(ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// `YYYY-MM-DD`.
pub fn format_trading_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
