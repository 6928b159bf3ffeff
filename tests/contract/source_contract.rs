//! Contract every registered source handler must honor, whatever the source returns.

#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use cambio_core::{
    keys, AppConfig, CurrencyCode, HandlerRegistryBuilder, HttpError, HttpResponse, SourceHandler,
};

use support::{feb, RecordingNotifier, ScriptedHttpClient};

const HOSTILE_BODIES: [&str; 6] = [
    "",
    "null",
    "[]",
    "<html><body><table><tr><td>x</td></tr></table></body></html>",
    "<table class='Tabla_borde'><tr><td>only</td></tr></table>",
    "\u{0}\u{1}garbage\u{7f}",
];

fn handlers(
    client: Arc<ScriptedHttpClient>,
    notifier: Arc<RecordingNotifier>,
) -> Vec<Arc<dyn SourceHandler>> {
    let registry = HandlerRegistryBuilder::new(AppConfig::default())
        .with_http_client(client)
        .with_notifier(notifier)
        .build();
    registry
        .codes()
        .into_iter()
        .filter_map(|code| registry.get(code))
        .collect()
}

#[test]
fn every_code_is_served_by_a_handler_with_matching_config() {
    let handlers = handlers(ScriptedHttpClient::body(""), RecordingNotifier::new());

    assert_eq!(handlers.len(), CurrencyCode::ALL.len());
    for handler in handlers {
        assert_eq!(handler.config().code, handler.code().as_str());
        assert!(!handler.config().display_name.is_empty());
    }
}

#[tokio::test]
async fn results_are_never_mixed_and_alerts_match_errors() {
    for body in HOSTILE_BODIES {
        for index in 0..CurrencyCode::ALL.len() {
            let client = ScriptedHttpClient::body(body);
            let notifier = RecordingNotifier::new();
            let handler = handlers(client, notifier.clone()).swap_remove(index);

            let result = handler
                .handle(feb(5))
                .await
                .expect("well-formed config never faults");

            // Either an entity or errors, never both and never neither.
            assert_ne!(result.entity().is_some(), !result.errors.is_empty(), "{} / {body:?}", handler.id());
            assert_eq!(result.is_success(), result.entity().is_some());

            if result.is_success() {
                assert_eq!(notifier.count(), 0, "{} / {body:?}", handler.id());
                let quotation = result.entity().expect("entity present");
                assert_eq!(quotation.currency_code(), handler.code().as_str());
                assert_eq!(quotation.date(), feb(5));
            } else {
                assert!(result.has_error(keys::STRUCTURE_ERROR));
                assert_eq!(notifier.count(), 1, "{} / {body:?}", handler.id());
            }
        }
    }
}

#[tokio::test]
async fn transport_outcomes_never_escape_as_faults() {
    let outcomes = || {
        vec![
            Err(HttpError::Timeout(String::from("timed out"))),
            Err(HttpError::Connect(String::from("refused"))),
            Ok(HttpResponse::new(404, "")),
            Ok(HttpResponse::new(503, "")),
        ]
    };

    for index in 0..CurrencyCode::ALL.len() {
        for outcome in outcomes() {
            let notifier = RecordingNotifier::new();
            let handler =
                handlers(ScriptedHttpClient::new(vec![outcome]), notifier.clone()).swap_remove(index);

            let result = handler.handle(feb(5)).await.expect("no fault");

            assert!(result.has_error(keys::STRUCTURE_ERROR));
            assert_eq!(notifier.count(), 1);
        }
    }
}
