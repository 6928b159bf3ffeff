use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Normalized quotation of one currency for one calendar date.
///
/// Values of exactly zero are never stored: a source publishing `0` means "no quotation", so
/// the constructor turns it into `None`. Values serialize as decimal strings with the scale the
/// source published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    sale_value: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    buy_value: Option<Decimal>,
    currency_name: String,
    currency_code: String,
}

impl Quotation {
    pub fn new(
        date: Date,
        sale_value: Option<Decimal>,
        buy_value: Option<Decimal>,
        currency_name: impl Into<String>,
        currency_code: impl AsRef<str>,
    ) -> Self {
        Self {
            date,
            sale_value: sale_value.and_then(non_zero),
            buy_value: buy_value.and_then(non_zero),
            currency_name: currency_name.into(),
            currency_code: currency_code.as_ref().trim().to_ascii_uppercase(),
        }
    }

    /// Quotation carrying no values, used when a source has nothing published for the date.
    pub fn unavailable(
        date: Date,
        currency_name: impl Into<String>,
        currency_code: impl AsRef<str>,
    ) -> Self {
        Self::new(date, None, None, currency_name, currency_code)
    }

    /// Date the quotation was requested for; serialized as `yyyy-MM-dd`.
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn sale_value(&self) -> Option<Decimal> {
        self.sale_value
    }

    pub fn buy_value(&self) -> Option<Decimal> {
        self.buy_value
    }

    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn available(&self) -> bool {
        self.sale_value.is_some_and(|value| !value.is_zero())
    }
}

/// Zero means "absent" for every source.
pub fn non_zero(value: Decimal) -> Option<Decimal> {
    if value.is_zero() {
        None
    } else {
        Some(value)
    }
}
