// tests/common/mod.rs
//
// Shared helpers: an in-process newsroom API serving the JSON fixtures, and a
// stub `NewsroomSource` for page/router tests that should not touch HTTP.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use newsroom_feeds::api::{agents, reports, signals, summaries};
use newsroom_feeds::feed::filter_by_theme;
use newsroom_feeds::{
    Agent, ApiError, ContentItem, Factor, FeedFilter, NewsroomSource, Report, Resource,
};

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path}: {e}"))
}

// ---------------------------------------------------------------------------
// Mock HTTP API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Fixture,
    Status(u16),
    Garbage,
    Json(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub resource: String,
    pub factor: Option<String>,
    pub raw_query: Vec<String>,
}

#[derive(Clone)]
struct MockState {
    behaviors: Arc<HashMap<String, Behavior>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

pub struct MockApi {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockApi {
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().expect("seen mutex").clone()
    }
}

async fn serve_resource(
    State(st): State<MockState>,
    Path(resource): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let mut raw_query: Vec<String> = q.iter().map(|(k, v)| format!("{k}={v}")).collect();
    raw_query.sort();
    st.seen.lock().expect("seen mutex").push(Seen {
        resource: resource.clone(),
        factor: q.get("factor").cloned(),
        raw_query,
    });

    match st.behaviors.get(&resource).copied().unwrap_or(Behavior::Fixture) {
        Behavior::Fixture => {
            let path = format!(
                "{}/tests/fixtures/{resource}.json",
                env!("CARGO_MANIFEST_DIR")
            );
            match std::fs::read_to_string(path) {
                Ok(body) => ([(CONTENT_TYPE, "application/json")], body).into_response(),
                Err(_) => StatusCode::NOT_FOUND.into_response(),
            }
        }
        Behavior::Status(code) => StatusCode::from_u16(code)
            .expect("valid status")
            .into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
        Behavior::Json(body) => ([(CONTENT_TYPE, "application/json")], body).into_response(),
    }
}

async fn echo(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "echo": body }))
}

/// Start the mock API on an ephemeral port. Resources without an explicit
/// behavior serve their fixture file.
pub async fn spawn_mock_api(behaviors: &[(&str, Behavior)]) -> MockApi {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        behaviors: Arc::new(
            behaviors
                .iter()
                .map(|(k, b)| (k.to_string(), *b))
                .collect(),
        ),
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/api/echo", post(echo))
        .route("/api/{resource}", get(serve_resource))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock api serve");
    });

    MockApi {
        base_url: format!("http://{addr}/api"),
        seen,
    }
}

// ---------------------------------------------------------------------------
// Stub source
// ---------------------------------------------------------------------------

/// Serves adapted fixtures. Factor filters are applied the way the real API
/// does it (server-side), and every call is recorded.
pub struct StubSource {
    pub signals: Vec<ContentItem>,
    pub summaries: Vec<ContentItem>,
    pub reports: Vec<Report>,
    pub agents: Vec<Agent>,
    pub calls: Mutex<Vec<(Resource, Option<Factor>)>>,
    pub fail: AtomicBool,
}

impl StubSource {
    pub fn from_fixtures() -> Self {
        let sig: Vec<signals::SignalRecord> =
            serde_json::from_str(&fixture("signals.json")).expect("signals fixture");
        let sum: Vec<summaries::SummaryRecord> =
            serde_json::from_str(&fixture("summaries.json")).expect("summaries fixture");
        let rep: Vec<reports::ReportRecord> =
            serde_json::from_str(&fixture("reports.json")).expect("reports fixture");
        let ag: Vec<agents::AgentRecord> =
            serde_json::from_str(&fixture("agents.json")).expect("agents fixture");
        Self {
            signals: sig.into_iter().map(signals::adapt_signal).collect(),
            summaries: sum.into_iter().map(summaries::adapt_summary).collect(),
            reports: rep.into_iter().map(reports::adapt_report).collect(),
            agents: ag.into_iter().map(agents::adapt_agent).collect(),
            calls: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(Resource, Option<Factor>)> {
        self.calls.lock().expect("calls mutex").clone()
    }

    pub fn calls_for(&self, resource: Resource) -> usize {
        self.calls().iter().filter(|(r, _)| *r == resource).count()
    }

    fn record(&self, resource: Resource, filter: FeedFilter) -> Result<(), ApiError> {
        self.calls
            .lock()
            .expect("calls mutex")
            .push((resource, filter.factor()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                text: "Service Unavailable".into(),
            });
        }
        Ok(())
    }
}

fn scoped<T: newsroom_feeds::model::Themed + Clone>(items: &[T], filter: FeedFilter) -> Vec<T> {
    match filter.factor() {
        Some(f) => filter_by_theme(items, f.theme()),
        None => items.to_vec(),
    }
}

#[async_trait::async_trait]
impl NewsroomSource for StubSource {
    async fn signals(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
        self.record(Resource::Signals, filter)?;
        Ok(scoped(&self.signals, filter))
    }

    async fn summaries(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
        self.record(Resource::Summaries, filter)?;
        Ok(scoped(&self.summaries, filter))
    }

    async fn reports(&self, filter: FeedFilter) -> Result<Vec<Report>, ApiError> {
        self.record(Resource::Reports, filter)?;
        Ok(scoped(&self.reports, filter))
    }

    async fn agents(&self, filter: FeedFilter) -> Result<Vec<Agent>, ApiError> {
        self.record(Resource::Agents, filter)?;
        Ok(self.agents.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
