//! A scanner stand-in that speaks just enough HTTP for the client.
//!
//! Binds `127.0.0.1:0`, answers from canned routes, and records every request
//! so tests can assert on exactly what went over the wire.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use scanbatch_common::config::ScannerConfig;

pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

enum PathMatch {
    Exact(String),
    Prefix(String),
}

struct Route {
    method: String,
    path: PathMatch,
    status: u16,
    body: String,
}

impl Route {
    fn matches(&self, method: &str, path: &str) -> bool {
        self.method == method
            && match &self.path {
                PathMatch::Exact(p) => p == path,
                PathMatch::Prefix(p) => path.starts_with(p.as_str()),
            }
    }
}

#[derive(Default)]
struct State {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl State {
    /// Latest registered route wins.
    fn respond(&self, method: &str, path: &str) -> (u16, String) {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.matches(method, path))
            .map(|r| (r.status, r.body.clone()))
            .unwrap_or((404, String::new()))
    }
}

pub struct MockScanner {
    addr: SocketAddr,
    state: Arc<State>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockScanner {
    pub async fn start() -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("binding mock scanner");
        let addr = listener.local_addr().expect("mock scanner address");
        let state = Arc::new(State::default());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(accept_loop(listener, state.clone(), shutdown_rx));

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A configuration pointing at this server.
    pub fn config(&self) -> ScannerConfig {
        ScannerConfig {
            api_url: self.url(),
            api_key: TEST_API_KEY.to_string(),
            ..ScannerConfig::default()
        }
    }

    pub fn on(&self, method: &str, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.add_route(method, PathMatch::Exact(path.to_string()), status, body.into())
    }

    pub fn on_prefix(&self, method: &str, prefix: &str, status: u16, body: impl Into<String>) -> &Self {
        self.add_route(method, PathMatch::Prefix(prefix.to_string()), status, body.into())
    }

    fn add_route(&self, method: &str, path: PathMatch, status: u16, body: String) -> &Self {
        self.state.routes.lock().unwrap().push(Route {
            method: method.to_string(),
            path,
            status,
            body,
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path.starts_with(prefix))
            .collect()
    }
}

impl Drop for MockScanner {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn accept_loop(listener: TcpListener, state: Arc<State>, mut shutdown_rx: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                let Ok((stream, _)) = result else { continue };
                let state = state.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req| handle(state.clone(), req));
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
            _ = &mut shutdown_rx => break,
        }
    }
}

async fn handle(
    state: Arc<State>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = req.into_body().collect().await?.to_bytes();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, body) = state.respond(&method, &path);
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}

/// A `127.0.0.1` URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("binding probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}
