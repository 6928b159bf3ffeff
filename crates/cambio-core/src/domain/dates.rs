//! Calendar date parsing and the per-source date renderings.
//!
//! Every source expects the date in its own shape, so the renderings are plain functions the
//! handlers pick from rather than a configurable format string.

use time::error::Format;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

/// Parse an ISO `yyyy-MM-dd` calendar date.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.trim().to_owned(),
        }
    })
}

/// `yyyy-MM-dd`
pub fn iso(date: Date) -> Result<String, Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

/// `dd/MM/yyyy`
pub fn padded_slashed(date: Date) -> Result<String, Format> {
    date.format(format_description!("[day]/[month]/[year]"))
}

/// `d/M/yyyy`
pub fn unpadded_slashed(date: Date) -> Result<String, Format> {
    date.format(format_description!(
        "[day padding:none]/[month padding:none]/[year]"
    ))
}

/// `dd-MM-yyyy`
pub fn padded_dashed(date: Date) -> Result<String, Format> {
    date.format(format_description!("[day]-[month]-[year]"))
}
