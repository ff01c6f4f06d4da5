#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use remote_nomads::config::Config;
use remote_nomads::services::notification_service::RecordingNotifier;
use remote_nomads::session::{MemorySessionStore, SessionStore};
use remote_nomads::AppState;

pub const PASSWORD: &str = "secret1";
const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct BackendState {
    pub jobs: Vec<JsonValue>,
    pub applications: Vec<JsonValue>,
    pub users: Vec<JsonValue>,
    pub profile: JsonValue,
    pub requests: Vec<Recorded>,
    /// Every request answers 401.
    pub force_unauthorized: bool,
    /// `PUT /applications/:id` answers 500.
    pub fail_updates: bool,
    /// Multipart parts seen by the last profile update: (name, file name, size).
    pub profile_parts: Vec<(String, Option<String>, usize)>,
    pub next_id: i64,
    /// When set, `GET /applications` and `POST /applications` wait for one
    /// permit before answering.
    pub gate: Option<Arc<Notify>>,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-process stand-in for the Remote Nomads REST API.
pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn spawn(state: BackendState) -> Self {
        let shared: Shared = Arc::new(Mutex::new(BackendState {
            next_id: 1000,
            ..state
        }));

        let app = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/auth/logout", post(ok_empty))
            .route("/api/v1/auth/register", post(register))
            .route("/api/v1/auth/reset-password", post(reset_password))
            .route("/api/v1/jobs", get(list_jobs).post(create_job))
            .route("/api/v1/jobs/:id", get(get_job).put(update_job).delete(delete_job))
            .route("/api/v1/applications", get(list_applications).post(apply))
            .route("/api/v1/applications/:id", put(update_application))
            .route("/api/v1/users", get(list_users).post(create_user))
            .route("/api/v1/users/:id", put(update_user).delete(delete_user))
            .route("/api/v1/candidates/profile", get(get_profile).put(update_profile))
            .layer(middleware::from_fn_with_state(shared.clone(), record))
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            state: shared,
        }
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<Recorded> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    /// App wired against this backend with an in-memory session store.
    pub fn app(&self) -> (AppState, Arc<MemorySessionStore>, RecordingNotifier) {
        let store = Arc::new(MemorySessionStore::new());
        let (state, notifier) = self.app_with_store(store.clone());
        (state, store, notifier)
    }

    pub fn app_with_store(&self, store: Arc<dyn SessionStore>) -> (AppState, RecordingNotifier) {
        let config = Config::for_base_url(&self.base_url, "unused-session.json".into())
            .expect("config");
        let notifier = RecordingNotifier::new();
        let state = AppState::with_store(config, store, Arc::new(notifier.clone()))
            .expect("app state");
        (state, notifier)
    }
}

pub fn job(id: i64, title: &str, company: &str, status: &str) -> JsonValue {
    json!({
        "id": id,
        "title": title,
        "company": company,
        "location": "Remote",
        "job_type": "full_time",
        "description": format!("{} at {}", title, company),
        "skills": "Rust, SQL",
        "status": status,
        "created_at": "2024-05-01T12:00:00"
    })
}

/// Reviewer-shaped application row.
pub fn application(id: i64, name: &str, email: &str, title: &str, status: &str) -> JsonValue {
    json!({
        "application_id": id,
        "job_id": 1,
        "job_title": title,
        "full_name": name,
        "email": email,
        "status": status,
        "applied_at": "2024-05-02T08:30:00",
        "cv_path": null
    })
}

pub fn user(id: i64, name: &str, email: &str, role: &str) -> JsonValue {
    json!({"id": id, "full_name": name, "email": email, "role": role, "status": "active"})
}

async fn record(State(shared): State<Shared>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let force_unauthorized = {
        let mut state = shared.lock().unwrap();
        state.requests.push(Recorded {
            method: request.method().to_string(),
            path: request
                .uri()
                .path()
                .trim_start_matches(API_PREFIX)
                .to_string(),
            authorization,
        });
        state.force_unauthorized
    };
    if force_unauthorized {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn same_id(value: &JsonValue, key: &str, id: &str) -> bool {
    match value.get(key) {
        Some(JsonValue::Number(n)) => n.to_string() == id,
        Some(JsonValue::String(s)) => s == id,
        _ => false,
    }
}

fn next_id(state: &mut BackendState) -> i64 {
    state.next_id += 1;
    state.next_id
}

async fn login(Json(body): Json<JsonValue>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some(PASSWORD) {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    }
    let role = if email.starts_with("admin") { "admin" } else { "candidate" };
    Json(json!({ "access_token": format!("token-{}", email), "token_type": "bearer", "role": role }))
        .into_response()
}

async fn ok_empty() -> StatusCode {
    StatusCode::OK
}

async fn register(Json(body): Json<JsonValue>) -> Response {
    if body["email"].as_str() == Some("taken@nomads.io") {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    (StatusCode::CREATED, Json(json!({ "message": "User registered successfully" }))).into_response()
}

async fn reset_password(Json(body): Json<JsonValue>) -> Response {
    if body["token"].as_str() != Some("good-token") {
        return detail(StatusCode::BAD_REQUEST, "Invalid or expired token");
    }
    Json(json!({ "message": "Password updated" })).into_response()
}

async fn list_jobs(State(shared): State<Shared>) -> Json<JsonValue> {
    Json(JsonValue::Array(shared.lock().unwrap().jobs.clone()))
}

async fn get_job(State(shared): State<Shared>, Path(id): Path<String>) -> Response {
    let state = shared.lock().unwrap();
    match state.jobs.iter().find(|j| same_id(j, "id", &id)) {
        Some(job) => Json(job.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Job not found"),
    }
}

async fn create_job(State(shared): State<Shared>, Json(mut body): Json<JsonValue>) -> Response {
    let mut state = shared.lock().unwrap();
    body["id"] = json!(next_id(&mut state));
    state.jobs.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_job(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Response {
    let mut state = shared.lock().unwrap();
    match state.jobs.iter_mut().find(|j| same_id(j, "id", &id)) {
        Some(job) => {
            if let (Some(target), Some(fields)) = (job.as_object_mut(), body.as_object()) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            Json(job.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Job not found"),
    }
}

async fn delete_job(State(shared): State<Shared>, Path(id): Path<String>) -> StatusCode {
    shared.lock().unwrap().jobs.retain(|j| !same_id(j, "id", &id));
    StatusCode::NO_CONTENT
}

async fn pass_gate(shared: &Shared) {
    let gate = shared.lock().unwrap().gate.clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

async fn list_applications(State(shared): State<Shared>) -> Json<JsonValue> {
    pass_gate(&shared).await;
    Json(JsonValue::Array(shared.lock().unwrap().applications.clone()))
}

async fn apply(State(shared): State<Shared>, Json(body): Json<JsonValue>) -> Response {
    pass_gate(&shared).await;
    let mut state = shared.lock().unwrap();
    let job_id = body["job_id"].as_str().unwrap_or_default().to_string();
    if state.applications.iter().any(|a| same_id(a, "job_id", &job_id)) {
        return detail(StatusCode::BAD_REQUEST, "You have already applied for this job");
    }
    let id = next_id(&mut state);
    let row = json!({ "application_id": id, "job_id": job_id, "status": "pending" });
    state.applications.push(row.clone());
    (StatusCode::CREATED, Json(row)).into_response()
}

async fn update_application(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Response {
    let mut state = shared.lock().unwrap();
    if state.fail_updates {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    match state
        .applications
        .iter_mut()
        .find(|a| same_id(a, "application_id", &id) || same_id(a, "id", &id))
    {
        Some(app) => {
            app["status"] = body["status"].clone();
            app["updated_at"] = json!("2024-06-01T10:00:00Z");
            Json(app.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Application not found"),
    }
}

async fn list_users(State(shared): State<Shared>) -> Json<JsonValue> {
    Json(JsonValue::Array(shared.lock().unwrap().users.clone()))
}

async fn create_user(State(shared): State<Shared>, Json(mut body): Json<JsonValue>) -> Response {
    let mut state = shared.lock().unwrap();
    body["id"] = json!(next_id(&mut state));
    if let Some(obj) = body.as_object_mut() {
        obj.remove("password");
    }
    state.users.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_user(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Response {
    let mut state = shared.lock().unwrap();
    match state.users.iter_mut().find(|u| same_id(u, "id", &id)) {
        Some(user) => {
            for key in ["full_name", "email", "role", "status"] {
                user[key] = body[key].clone();
            }
            Json(user.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(State(shared): State<Shared>, Path(id): Path<String>) -> StatusCode {
    shared.lock().unwrap().users.retain(|u| !same_id(u, "id", &id));
    StatusCode::NO_CONTENT
}

async fn get_profile(State(shared): State<Shared>) -> Json<JsonValue> {
    Json(shared.lock().unwrap().profile.clone())
}

async fn update_profile(
    State(shared): State<Shared>,
    headers: HeaderMap,
    request: Request,
) -> Response {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let mut fields = serde_json::Map::new();
    let mut parts = Vec::new();
    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await.expect("multipart");
        while let Some(field) = multipart.next_field().await.expect("field") {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.expect("bytes");
            if file_name.is_none() {
                fields.insert(name.clone(), json!(String::from_utf8_lossy(&bytes)));
            }
            parts.push((name, file_name, bytes.len()));
        }
    } else {
        let Json(body): Json<JsonValue> = Json::from_request(request, &()).await.expect("json");
        if let Some(obj) = body.as_object() {
            fields = obj.clone();
        }
    }

    let mut state = shared.lock().unwrap();
    if let Some(profile) = state.profile.as_object_mut() {
        for (k, v) in fields {
            profile.insert(k, v);
        }
        if parts.iter().any(|(name, file, _)| name == "cv" && file.is_some()) {
            profile.insert("cv_path".into(), json!("uploads/cv.pdf"));
        }
    }
    state.profile_parts = parts;
    Json(state.profile.clone()).into_response()
}
