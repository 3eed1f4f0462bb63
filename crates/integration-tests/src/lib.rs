//! Integration tests for ComplaintHub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p complaint-hub-integration-tests
//! ```
//!
//! No external services are needed: [`FakeBackend`] serves the complaints REST
//! API in-process on an ephemeral port, so tests exercise the real
//! `HttpTransport` over real HTTP.
//!
//! # Test Categories
//!
//! - `lifecycle_sync` - Controller + HTTP transport against the fake backend
//! - `transport_errors` - Error classification for each failure mode
//! - `admin_gating` - Presentation-style gating of status updates
//! - `draft_validation` - Draft rules as seen through the public API

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use complaint_hub_client::{HttpTransport, LifecycleController};
use complaint_hub_core::{Category, Complaint, ComplaintId, ComplaintStatus, CreatedDate};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Timestamp stamped on every complaint the fake backend creates.
pub const FAKE_CREATED_DATE: &str = "2024-01-01";

/// How the fake backend answers `GET /api/complaints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    #[default]
    Normal,
    /// `500 Internal Server Error`
    ServerError,
    /// `200 OK` with a body that is not JSON
    Garbage,
}

/// How the fake backend answers `POST /api/complaints`.
///
/// Only `Normal` stores the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateMode {
    #[default]
    Normal,
    /// `500 Internal Server Error`
    ServerError,
    /// `201 Created` with a body that is not JSON
    Garbage,
    /// `201 Created` with an empty `complaintId`
    BlankId,
    /// `201 Created` with a record that is already `resolved`
    Resolved,
}

/// How the fake backend answers `PUT /api/complaints/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    #[default]
    Normal,
    /// `500 Internal Server Error`, nothing changed
    ServerError,
}

#[derive(Default)]
struct BackendState {
    complaints: Vec<Complaint>,
    next_ids: VecDeque<String>,
    list_mode: ListMode,
    create_mode: CreateMode,
    update_mode: UpdateMode,
    requests: usize,
}

type SharedState = Arc<Mutex<BackendState>>;

/// In-process complaints backend.
pub struct FakeBackend {
    addr: SocketAddr,
    state: SharedState,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind on `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = SharedState::default();
        let app = Router::new()
            .route("/api/complaints", get(list).post(create))
            .route("/api/complaints/{complaint_id}/status", put(update_status))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend stopped");
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Collection URL, as `COMPLAINTS_API_URL` would hold it.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/api/complaints", self.addr)
    }

    /// Controller wired to this backend over HTTP.
    ///
    /// # Panics
    ///
    /// Panics if the transport cannot be built.
    #[must_use]
    pub fn controller(&self) -> LifecycleController<HttpTransport> {
        LifecycleController::new(self.transport())
    }

    /// # Panics
    ///
    /// Panics if the transport cannot be built.
    #[must_use]
    pub fn transport(&self) -> HttpTransport {
        let url = self.url().parse().expect("valid url");
        HttpTransport::new(url, std::time::Duration::from_secs(5)).expect("transport")
    }

    /// Use `id` for the next created complaint instead of a random one.
    pub fn push_id(&self, id: &str) {
        self.lock().next_ids.push_back(id.to_string());
    }

    pub fn set_list_mode(&self, mode: ListMode) {
        self.lock().list_mode = mode;
    }

    pub fn set_create_mode(&self, mode: CreateMode) {
        self.lock().create_mode = mode;
    }

    pub fn set_update_mode(&self, mode: UpdateMode) {
        self.lock().update_mode = mode;
    }

    /// Insert a record directly, bypassing `POST`.
    pub fn seed(&self, complaint: Complaint) {
        self.lock().complaints.push(complaint);
    }

    /// Number of HTTP requests served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    /// Server-side records.
    #[must_use]
    pub fn stored(&self) -> Vec<Complaint> {
        self.lock().complaints.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().expect("backend state poisoned")
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Build a complaint the way the backend would store it.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
pub fn stored_complaint(id: &str, name: &str, category: Category) -> Complaint {
    Complaint {
        complaint_id: ComplaintId::parse(id).expect("non-empty id"),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        category,
        description: format!("{name}'s complaint"),
        status: ComplaintStatus::Pending,
        created_date: CreatedDate::from(FAKE_CREATED_DATE.to_string()),
    }
}

#[derive(Deserialize)]
struct CreateBody {
    name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    category: Category,
    description: String,
}

#[derive(Deserialize)]
struct StatusQuery {
    status: ComplaintStatus,
}

async fn create(State(state): State<SharedState>, Json(body): Json<CreateBody>) -> Response {
    let mut state = state.lock().expect("backend state poisoned");
    state.requests += 1;

    match state.create_mode {
        CreateMode::ServerError => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
        }
        CreateMode::Garbage => {
            return (StatusCode::CREATED, "<html>maintenance</html>").into_response();
        }
        CreateMode::Normal | CreateMode::BlankId | CreateMode::Resolved => {}
    }

    let id = state.next_ids.pop_front().unwrap_or_else(|| {
        let random: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .to_uppercase()
            .chars()
            .take(8)
            .collect();
        format!("COMP-{random}")
    });

    let complaint = Complaint {
        complaint_id: ComplaintId::parse(&id).expect("non-empty id"),
        name: body.name,
        email: body.email,
        phone: body.phone.filter(|p| !p.is_empty()),
        category: body.category,
        description: body.description,
        status: ComplaintStatus::Pending,
        created_date: CreatedDate::from(FAKE_CREATED_DATE.to_string()),
    };

    match state.create_mode {
        CreateMode::BlankId => {
            let mut body = serde_json::to_value(&complaint).expect("serializable complaint");
            body["complaintId"] = serde_json::Value::String(String::new());
            (StatusCode::CREATED, Json(body)).into_response()
        }
        CreateMode::Resolved => {
            let mut complaint = complaint;
            complaint.status = ComplaintStatus::Resolved;
            (StatusCode::CREATED, Json(complaint)).into_response()
        }
        CreateMode::Normal | CreateMode::ServerError | CreateMode::Garbage => {
            state.complaints.push(complaint.clone());
            (StatusCode::CREATED, Json(complaint)).into_response()
        }
    }
}

async fn list(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().expect("backend state poisoned");
    state.requests += 1;

    match state.list_mode {
        ListMode::Normal => Json(state.complaints.clone()).into_response(),
        ListMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
        }
        ListMode::Garbage => "<html>maintenance</html>".into_response(),
    }
}

async fn update_status(
    State(state): State<SharedState>,
    Path(complaint_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let mut state = state.lock().expect("backend state poisoned");
    state.requests += 1;

    if state.update_mode == UpdateMode::ServerError {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    match state
        .complaints
        .iter_mut()
        .find(|c| c.complaint_id.as_str() == complaint_id)
    {
        Some(complaint) => {
            complaint.status = query.status;
            Json(complaint.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
