//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quotation`] | Normalized quotation for one currency and date |
//! | [`CurrencyCode`] | Closed set of supported currency codes |
//!
//! Date renderings used by the sources live in [`dates`].

pub mod dates;

mod currency_code;
mod quotation;

pub use currency_code::CurrencyCode;
pub use quotation::{non_zero, Quotation};
