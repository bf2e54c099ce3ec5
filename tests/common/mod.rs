#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::{header, StatusCode};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use predict_form::{
    Constraints, Form, FormSnapshot, NumberInput, PredictError, PredictionClient,
    PredictionResult, Step,
};

pub fn field(name: &str, value: &str) -> NumberInput {
    NumberInput::new(name, Constraints::default().step(Step::Any)).with_value(value)
}

/// A filled-in house price form.
pub fn house_form() -> Form {
    let mut form = Form::house_prices();
    for (name, value) in [
        ("longitude", "-122.23"),
        ("latitude", "37.88"),
        ("housing_median_age", "41"),
        ("total_rooms", "880"),
        ("total_bedrooms", "129"),
        ("population", "322"),
        ("households", "126"),
        ("median_income", "8.3252"),
    ] {
        form.input_mut(name).unwrap().set_value(value);
    }
    form
}

struct Call {
    snapshot: FormSnapshot,
    reply: Option<oneshot::Sender<Result<PredictionResult, PredictError>>>,
}

/// Client whose requests stay pending until the test resolves them.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn snapshot(&self, index: usize) -> FormSnapshot {
        self.calls.borrow()[index].snapshot.clone()
    }

    pub fn resolve(&self, index: usize, result: Result<PredictionResult, PredictError>) {
        let reply = self.calls.borrow_mut()[index]
            .reply
            .take()
            .expect("request already resolved");
        let _ = reply.send(result);
    }

    pub fn succeed(&self, index: usize, predicted_price: f64) {
        self.resolve(index, Ok(PredictionResult { predicted_price }));
    }
}

impl PredictionClient for ScriptedClient {
    fn predict(
        &self,
        snapshot: FormSnapshot,
    ) -> LocalBoxFuture<'static, Result<PredictionResult, PredictError>> {
        let (reply, pending) = oneshot::channel();
        self.calls.borrow_mut().push(Call {
            snapshot,
            reply: Some(reply),
        });
        async move {
            pending
                .await
                .unwrap_or_else(|_| Err(PredictError::Transport(anyhow::anyhow!("request dropped"))))
        }
        .boxed_local()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

struct StubState {
    status: u16,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn predict(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        content_type,
        body: body.to_vec(),
    });

    HttpResponse::build(StatusCode::from_u16(state.status).unwrap())
        .content_type("application/json")
        .body(state.body.clone())
}

/// Stand-in for the prediction service that answers every `POST /predict`
/// with a fixed status and body.
pub struct StubService {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubService {
    pub async fn start(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            status,
            body: body.to_string(),
            requests: requests.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/predict", web::post().to(predict))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub service");
        let addr = server.addrs()[0];

        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            url: format!("http://{addr}/predict"),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// An endpoint on a port nothing listens on.
pub fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/predict")
}
