//! Public entry point: resolves the handler for a currency code and shields callers from
//! anything the handler did not anticipate.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use time::Date;
use tracing::{error, info, warn};

use crate::domain::{CurrencyCode, Quotation};
use crate::registry::HandlerRegistry;
use crate::result::{keys, OperationResult};

#[derive(Clone)]
pub struct CurrencyService {
    registry: Arc<HandlerRegistry>,
}

impl CurrencyService {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Quotation of `code` for `date`, as published by the source registered for that code.
    ///
    /// Never fails: unmapped codes become `invalid currency code`, handler faults and panics
    /// become `internal error`. No retries happen at this level.
    pub async fn get_quotation(&self, date: Date, code: CurrencyCode) -> OperationResult<Quotation> {
        let Some(handler) = self.registry.get(code) else {
            warn!(%code, "no handler registered for currency code");
            return OperationResult::failure(
                keys::INVALID_CURRENCY_CODE,
                format!("currency code {code} has no registered source"),
            );
        };

        info!(%code, source = %handler.id(), %date, "getting quotation");

        // Covers panics raised by `handle` itself, not only while polling its future.
        let attempt = AssertUnwindSafe(async { handler.handle(date).await });
        match attempt.catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(fault)) => {
                error!(%code, %date, error = %fault, "handler failed");
                internal_error(code, date)
            }
            Err(payload) => {
                error!(%code, %date, panic = panic_message(payload.as_ref()), "handler panicked");
                internal_error(code, date)
            }
        }
    }

    /// Same as [`CurrencyService::get_quotation`] for a code that has not been parsed yet.
    pub async fn get_quotation_raw(&self, date: Date, code: &str) -> OperationResult<Quotation> {
        match CurrencyCode::parse(code) {
            Ok(code) => self.get_quotation(date, code).await,
            Err(invalid) => {
                warn!(error = %invalid, "rejected currency code");
                OperationResult::failure(keys::INVALID_CURRENCY_CODE, invalid.to_string())
            }
        }
    }
}

fn internal_error(code: CurrencyCode, date: Date) -> OperationResult<Quotation> {
    OperationResult::failure(
        keys::INTERNAL_ERROR,
        format!("unexpected failure getting {code} quotation for {date}"),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
