//! Behavior tests for the per-source handlers, driven through the public service.
//!
//! Each test scripts the body a source returns and checks what the caller observes: the
//! quotation, the error or notice keys, and how many alerts were raised.

mod support;

use cambio_core::{keys, AppConfig, CurrencyCode, HttpError, HttpResponse};
use rust_decimal_macros::dec;

use support::{
    feb, service_with, RecordingNotifier, ScriptedHttpClient, BNA_NO_RESULTS, BNA_TWO_ROWS,
    BNA_WITHOUT_SECOND_ROW, DOF_TABLE, TRM_RECORD,
};

// =============================================================================
// Quotations found
// =============================================================================

#[tokio::test]
async fn bna_quotation_is_read_from_the_row_matching_the_date() {
    // Given: the bank page lists quotations for the 4th and the 5th
    let client = ScriptedHttpClient::body(BNA_TWO_ROWS);
    let notifier = RecordingNotifier::new();
    let service = service_with(AppConfig::default(), client.clone(), notifier.clone());

    // When: the 5th is requested
    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    // Then: buy and sale come from the matching row
    assert!(result.is_success(), "{result:?}");
    let quotation = result.entity().expect("entity present");
    assert_eq!(quotation.date(), feb(5));
    assert_eq!(quotation.buy_value(), Some(dec!(58.0000)));
    assert_eq!(quotation.sale_value(), Some(dec!(63.0000)));
    assert_eq!(quotation.currency_code(), "ARS");
    assert!(quotation.available());

    // And: nobody was alerted, and the date travelled in the query string
    assert_eq!(notifier.count(), 0);
    assert!(client.urls()[0].ends_with("&fecha=05%2F02%2F2020"));
}

#[tokio::test]
async fn dof_quotation_normalizes_the_dot_decimal_value() {
    let client = ScriptedHttpClient::body(DOF_TABLE);
    let notifier = RecordingNotifier::new();
    let service = service_with(AppConfig::default(), client.clone(), notifier.clone());

    let result = service.get_quotation(feb(5), CurrencyCode::Mxn).await;

    assert!(result.is_success(), "{result:?}");
    let quotation = result.entity().expect("entity present");
    assert_eq!(quotation.sale_value(), Some(dec!(18.679700)));
    assert_eq!(quotation.buy_value(), None);
    assert_eq!(quotation.currency_name(), "Peso Mexicano");
    assert!(client.urls()[0].ends_with("&dfecha=05%2F02%2F2020&hfecha=05%2F02%2F2020"));
}

#[tokio::test]
async fn trm_quotation_takes_the_first_record_and_the_requested_date() {
    let client = ScriptedHttpClient::body(TRM_RECORD);
    let service = service_with(AppConfig::default(), client.clone(), RecordingNotifier::new());

    let result = service.get_quotation(feb(5), CurrencyCode::Cop).await;

    let quotation = result.entity().expect("entity present");
    assert_eq!(quotation.sale_value(), Some(dec!(3783.15)));
    assert_eq!(quotation.date(), feb(5));
    assert!(client.urls()[0].ends_with("vigenciahasta=2020-02-05"));
}

// =============================================================================
// Nothing published for the date
// =============================================================================

#[tokio::test]
async fn bna_without_results_is_a_quiet_success() {
    // Given: the bank says there are no quotations (weekend or holiday)
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body(BNA_NO_RESULTS),
        notifier.clone(),
    );

    // When
    let result = service.get_quotation(feb(8), CurrencyCode::Ars).await;

    // Then: success with an unavailable quotation and an informational notice
    assert!(result.is_success());
    assert!(!result.entity().expect("entity present").available());
    assert!(result.errors.is_empty());
    assert_eq!(
        result.notices[keys::NO_DATA_FOR_DATE],
        vec![AppConfig::default().sources.bna.no_data_marker]
    );

    // And: this is not worth an alert
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn trm_empty_array_is_an_unavailable_success() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body("[]"),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(8), CurrencyCode::Cop).await;

    assert!(result.is_success());
    let quotation = result.entity().expect("entity present");
    assert!(!quotation.available());
    assert_eq!(quotation.sale_value(), None);
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn bna_zero_buy_value_is_absent() {
    // Given: the bank publishes a zero buy value for the requested day
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body(&BNA_TWO_ROWS.replace(
            "58,0000</td><td class='dest'>63,0000</td><td>5/2/2020",
            "0,0000</td><td class='dest'>63,0000</td><td>5/2/2020",
        )),
        notifier.clone(),
    );

    // When
    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    // Then: buy is null, sale still makes the quotation available
    let quotation = result.entity().expect("entity present");
    assert_eq!(quotation.buy_value(), None);
    assert_eq!(quotation.sale_value(), Some(dec!(63.0000)));
    assert!(quotation.available());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn bna_zero_sale_value_makes_the_quotation_unavailable() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body(&BNA_TWO_ROWS.replace(
            "58,0000</td><td class='dest'>63,0000</td><td>5/2/2020",
            "0,0000</td><td class='dest'>0,0000</td><td>5/2/2020",
        )),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    assert!(result.is_success(), "{result:?}");
    let quotation = result.entity().expect("entity present");
    assert_eq!(quotation.buy_value(), None);
    assert_eq!(quotation.sale_value(), None);
    assert!(!quotation.available());
    assert_eq!(notifier.count(), 0);
}

// =============================================================================
// Structure changes and transport failures
// =============================================================================

#[tokio::test]
async fn bna_missing_validation_row_fails_and_alerts_once() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body(BNA_WITHOUT_SECOND_ROW),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    assert!(!result.is_success());
    assert!(result.entity().is_none());
    assert!(result.has_error(keys::STRUCTURE_ERROR));
    assert_eq!(notifier.count(), 1);
    assert_eq!(
        notifier.messages()[0],
        "Can't get currency from ARS currency code, please check the bna response in the log or if the date is holiday 2020-02-05"
    );
}

#[tokio::test]
async fn malformed_markup_always_alerts_exactly_once() {
    let cases: Vec<(CurrencyCode, String)> = vec![
        (
            CurrencyCode::Ars,
            String::from("<html><body><p>maintenance</p></body></html>"),
        ),
        (
            CurrencyCode::Ars,
            BNA_TWO_ROWS.replace("63,0000</td><td>5/2/2020", "</td><td>5/2/2020"),
        ),
        (CurrencyCode::Mxn, DOF_TABLE.replace("Tabla_borde", "Tabla_nueva")),
        (CurrencyCode::Mxn, DOF_TABLE.replace("05-02-2020", "04-02-2020")),
        (CurrencyCode::Cop, String::new()),
        (CurrencyCode::Cop, String::from("{\"error\":\"quota\"}")),
    ];

    for (code, body) in cases {
        let notifier = RecordingNotifier::new();
        let service = service_with(
            AppConfig::default(),
            ScriptedHttpClient::body(&body),
            notifier.clone(),
        );

        let result = service.get_quotation(feb(5), code).await;

        assert!(!result.is_success(), "{code}: {body}");
        assert!(result.has_error(keys::STRUCTURE_ERROR), "{code}: {body}");
        assert_eq!(notifier.count(), 1, "{code}: {body}");
    }
}

#[tokio::test]
async fn transport_failure_is_reported_like_a_structure_change() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::new(vec![Err(HttpError::Connect(String::from("connection refused")))]),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Mxn).await;

    assert!(result.has_error(keys::STRUCTURE_ERROR));
    assert!(result.errors[keys::STRUCTURE_ERROR][0].contains("connection refused"));
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn final_error_status_is_reported_like_a_structure_change() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::new(vec![Ok(HttpResponse::new(500, "<html>oops</html>"))]),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    assert!(result.has_error(keys::STRUCTURE_ERROR));
    assert!(result.errors[keys::STRUCTURE_ERROR][0].contains("500"));
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn html_served_to_the_json_source_is_a_structure_change() {
    let notifier = RecordingNotifier::new();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::new(vec![Ok(HttpResponse {
            status: 200,
            content_type: Some(String::from("text/html; charset=utf-8")),
            body: String::from("<html><body>maintenance</body></html>"),
        })]),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Cop).await;

    assert!(result.has_error(keys::STRUCTURE_ERROR));
    assert!(result.errors[keys::STRUCTURE_ERROR][0].contains("invalid TRM payload"));
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn failed_alert_delivery_does_not_change_the_result() {
    let notifier = RecordingNotifier::failing();
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::body(BNA_WITHOUT_SECOND_ROW),
        notifier.clone(),
    );

    let result = service.get_quotation(feb(5), CurrencyCode::Ars).await;

    assert_eq!(result.errors.len(), 1);
    assert!(result.has_error(keys::STRUCTURE_ERROR));
    assert_eq!(notifier.count(), 1);
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn same_body_yields_the_same_quotation() {
    let service = service_with(
        AppConfig::default(),
        ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok(BNA_TWO_ROWS)),
            Ok(HttpResponse::ok(BNA_TWO_ROWS)),
        ]),
        RecordingNotifier::new(),
    );

    let first = service.get_quotation(feb(4), CurrencyCode::Ars).await;
    let second = service.get_quotation(feb(4), CurrencyCode::Ars).await;

    assert_eq!(first, second);
    assert_eq!(first.entity().expect("entity present").date(), feb(4));
}
