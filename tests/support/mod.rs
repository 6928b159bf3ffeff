//! Test doubles shared by the behavior and contract suites.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cambio_core::http_client::HttpFuture;
use cambio_core::notification::NotifyFuture;
use cambio_core::{
    AppConfig, CurrencyService, HandlerRegistryBuilder, HttpClient, HttpError, HttpRequest,
    HttpResponse, Notifier, NotifyError,
};
use time::{Date, Month};

/// Transport answering from a queue of canned outcomes and recording every request.
#[derive(Default)]
pub struct ScriptedHttpClient {
    outcomes: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(outcomes: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn body(body: &str) -> Arc<Self> {
        Self::new(vec![Ok(HttpResponse::ok(body))])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        self.requests.lock().expect("lock").push(request);
        let outcome = self
            .outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::InvalidRequest(String::from("no scripted response left"))));
        Box::pin(async move { outcome })
    }
}

/// Notifier that remembers every message and optionally fails delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock").clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().expect("lock").len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(&'a self, message: &'a str) -> NotifyFuture<'a> {
        self.messages.lock().expect("lock").push(message.to_owned());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(NotifyError::new("hook unreachable"))
            } else {
                Ok(())
            }
        })
    }
}

/// Service over the default configuration wired to the given doubles.
pub fn service_with(
    config: AppConfig,
    client: Arc<ScriptedHttpClient>,
    notifier: Arc<RecordingNotifier>,
) -> CurrencyService {
    let registry = HandlerRegistryBuilder::new(config)
        .with_http_client(client)
        .with_notifier(notifier)
        .build();
    CurrencyService::new(registry)
}

pub fn feb(day: u8) -> Date {
    Date::from_calendar_date(2020, Month::February, day).expect("valid date")
}

pub const BNA_TWO_ROWS: &str = r#"<div id='cotizacionesCercanas'>
<table class='table table-bordered cotizador' style='float:none; width:100%; text-align: center;'>
<thead>
<tr><th>Monedas</th><th>Compra</th><th>Venta</th><th>Fecha</th></tr>
</thead>
<tbody>
<tr><td>Dolar U.S.A</td><td class='dest'>58,0000</td><td class='dest'>63,0000</td><td>4/2/2020</td></tr>
<tr><td>Dolar U.S.A</td><td class='dest'>58,0000</td><td class='dest'>63,0000</td><td>5/2/2020</td></tr>
</tbody>
</table>
</div>"#;

pub const BNA_NO_RESULTS: &str =
    "<div id='cotizacionesCercanas'><div class='sinResultados'>No hay cotizaciones pendientes para esa fecha.</div></div>";

pub const BNA_WITHOUT_SECOND_ROW: &str = r#"<table class='table table-bordered cotizador'>
<thead><tr><th>Monedas</th><th>Compra</th><th>Venta</th><th>Fecha</th></tr></thead>
</table>"#;

pub const DOF_TABLE: &str = r#"<table width='70%' border='0' cellspacing='0' cellpadding='0' class='Tabla_borde' align='center'>
<tr class='txt_blanco' bgcolor='#b2b2b2'><td height='17' width='48%' align='center'>Fecha</td><td height='17' width='52%' align='center'>Valor</td></tr>
<tr class='Celda 1'><td height='17' width='48%' align='center' class='txt'>05-02-2020</td><td width='52%' align='center' class='txt'>18.679700</td></tr>
</table>"#;

pub const TRM_RECORD: &str =
    r#"[{"valor":"3783.15","vigenciadesde":"2020-02-05T00:00:00.000","vigenciahasta":"2020-02-05T00:00:00.000"}]"#;
