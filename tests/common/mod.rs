//! Shared test infrastructure: an in-process fake of the RBAC REST API.
//!
//! # Fake API
//! - `FakeApi::start()` binds an actix-web server on an ephemeral port.
//! - Collections live in `FakeState` and can be seeded or inspected directly.
//! - `/api/events` streams `FakeState::events` as server-sent events, then
//!   either closes or stays open depending on `hold_open`.
#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use futures_util::stream::{self, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// FIXTURES
// ============================================================================

pub fn sample_users() -> Value {
    json!([
        {"id": 1, "name": "Alice", "email": "alice@example.com", "role": "Admin", "status": "Active"},
        {"id": 2, "name": "Bob", "email": "bob@example.com", "role": "Viewer", "status": "Inactive"},
    ])
}

pub fn sample_roles() -> Value {
    json!([
        {"id": 1, "name": "Admin", "description": "Everything", "permissions": ["read", "write", "delete"]},
        {"id": 2, "name": "Viewer", "description": "Read only", "permissions": ["read"]},
    ])
}

pub fn sample_permissions() -> Value {
    json!([
        {"id": 1, "name": "read", "description": "Read records"},
        {"id": 2, "name": "write", "description": "Write records"},
        {"id": 3, "name": "delete", "description": "Delete records"},
    ])
}

// ============================================================================
// FAKE SERVER
// ============================================================================

pub struct FakeState {
    pub users: Mutex<Vec<Value>>,
    pub roles: Mutex<Vec<Value>>,
    pub permissions: Mutex<Vec<Value>>,
    /// (resource, body) of every bulk delete received.
    pub bulk_requests: Mutex<Vec<(String, Value)>>,
    pub bulk_reply: Mutex<(u16, Value)>,
    /// SSE payloads sent on every connection to /api/events.
    pub events: Mutex<Vec<String>>,
    pub hold_open: AtomicBool,
    pub event_connections: AtomicUsize,
    next_id: AtomicUsize,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            users: Mutex::new(as_vec(sample_users())),
            roles: Mutex::new(as_vec(sample_roles())),
            permissions: Mutex::new(as_vec(sample_permissions())),
            bulk_requests: Mutex::new(Vec::new()),
            bulk_reply: Mutex::new((200, json!({"success": true}))),
            events: Mutex::new(Vec::new()),
            hold_open: AtomicBool::new(false),
            event_connections: AtomicUsize::new(0),
            next_id: AtomicUsize::new(100),
        }
    }
}

impl FakeState {
    fn collection(&self, resource: &str) -> Option<&Mutex<Vec<Value>>> {
        match resource {
            "users" => Some(&self.users),
            "roles" => Some(&self.roles),
            "permissions" => Some(&self.permissions),
            _ => None,
        }
    }

    pub fn push_event(&self, payload: Value) {
        self.events.lock().unwrap().push(payload.to_string());
    }

    pub fn connections(&self) -> usize {
        self.event_connections.load(Ordering::SeqCst)
    }
}

fn as_vec(v: Value) -> Vec<Value> {
    v.as_array().cloned().unwrap_or_default()
}

fn same_id(record: &Value, id: &str) -> bool {
    match &record["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list(state: web::Data<FakeState>, path: web::Path<String>) -> HttpResponse {
    match state.collection(&path) {
        Some(c) => HttpResponse::Ok().json(c.lock().unwrap().clone()),
        None => HttpResponse::NotFound().json(json!({})),
    }
}

async fn read(state: web::Data<FakeState>, path: web::Path<(String, String)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let found = state
        .collection(&resource)
        .and_then(|c| c.lock().unwrap().iter().find(|r| same_id(r, &id)).cloned());
    match found {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound().json(json!({})),
    }
}

async fn create(
    state: web::Data<FakeState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let Some(c) = state.collection(&path) else {
        return HttpResponse::NotFound().json(json!({}));
    };
    let mut record = body.into_inner();
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    record["id"] = Value::String(id.to_string());
    c.lock().unwrap().push(record.clone());
    HttpResponse::Created().json(record)
}

async fn update(
    state: web::Data<FakeState>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let Some(c) = state.collection(&resource) else {
        return HttpResponse::NotFound().json(json!({}));
    };
    let mut items = c.lock().unwrap();
    match items.iter_mut().find(|r| same_id(r, &id)) {
        Some(slot) => {
            let mut record = body.into_inner();
            record["id"] = slot["id"].clone();
            *slot = record.clone();
            HttpResponse::Ok().json(record)
        }
        None => HttpResponse::NotFound().json(json!({})),
    }
}

async fn remove(state: web::Data<FakeState>, path: web::Path<(String, String)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    let Some(c) = state.collection(&resource) else {
        return HttpResponse::NotFound().json(json!({}));
    };
    let mut items = c.lock().unwrap();
    let before = items.len();
    items.retain(|r| !same_id(r, &id));
    if items.len() == before {
        HttpResponse::NotFound().json(json!({}))
    } else {
        HttpResponse::Ok().json(json!({}))
    }
}

async fn bulk_delete(
    state: web::Data<FakeState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    state
        .bulk_requests
        .lock()
        .unwrap()
        .push((path.into_inner(), body.into_inner()));
    let (status, reply) = state.bulk_reply.lock().unwrap().clone();
    let status = actix_web::http::StatusCode::from_u16(status).unwrap();
    HttpResponse::build(status).json(reply)
}

async fn events(state: web::Data<FakeState>) -> HttpResponse {
    state.event_connections.fetch_add(1, Ordering::SeqCst);
    let frames: Vec<Result<web::Bytes, std::io::Error>> = state
        .events
        .lock()
        .unwrap()
        .iter()
        .map(|p| Ok(web::Bytes::from(format!("data: {p}\n\n"))))
        .collect();
    let body = stream::iter(frames);
    let mut response = HttpResponse::Ok();
    response.content_type("text/event-stream");
    if state.hold_open.load(Ordering::SeqCst) {
        response.streaming(body.chain(stream::pending()))
    } else {
        response.streaming(body)
    }
}

pub struct FakeApi {
    pub addr: SocketAddr,
    pub state: web::Data<FakeState>,
    handle: ServerHandle,
}

impl FakeApi {
    pub async fn start() -> FakeApi {
        Self::start_with(FakeState::default()).await
    }

    pub async fn start_with(state: FakeState) -> FakeApi {
        let state = web::Data::new(state);
        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/api/events", web::get().to(events))
                .route("/bulk/{resource}", web::delete().to(bulk_delete))
                .route("/{resource}", web::get().to(list))
                .route("/{resource}", web::post().to(create))
                .route("/{resource}/{id}", web::get().to(read))
                .route("/{resource}/{id}", web::put().to(update))
                .route("/{resource}/{id}", web::delete().to(remove))
        })
        .workers(1)
        .disable_signals()
        .bind("127.0.0.1:0")
        .expect("Failed to bind fake API");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        FakeApi { addr, state, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Poll `check` until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    addr
}
