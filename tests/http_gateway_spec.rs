use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use codesign_studio::auth::{AuthSession, Role};
use codesign_studio::client::{ClientError, StudioClient};
use codesign_studio::error::Redirect;
use codesign_studio::models::*;
use codesign_studio::sync::HttpGateway;
use codesign_studio::tools::*;
use codesign_studio::{Capabilities, Gateways, WorkflowEngine};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

const TOKEN: &str = "test-token";

#[derive(Default)]
struct Recorded {
    documents: HashMap<(String, Uuid), Value>,
    steps: Vec<(Uuid, usize)>,
}

#[derive(Clone)]
struct Stub {
    session_id: Uuid,
    recorded: Arc<Mutex<Recorded>>,
}

#[derive(Deserialize)]
struct StepQuery {
    step: usize,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", TOKEN))
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "id": Uuid::nil(),
        "name": "Sam",
        "email": "sam@example.org",
        "role": "facilitator"
    })))
}

async fn get_session(
    State(stub): State<Stub>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, StatusCode> {
    if id != stub.session_id {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": id,
        "project_id": Uuid::nil(),
        "name": "Kickoff",
        "description": "",
        "current_step": 9,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })))
}

async fn set_step(
    State(stub): State<Stub>,
    Path(id): Path<Uuid>,
    Query(query): Query<StepQuery>,
) -> StatusCode {
    stub.recorded.lock().steps.push((id, query.step));
    StatusCode::OK
}

async fn get_document(
    State(stub): State<Stub>,
    Path((resource, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, StatusCode> {
    if resource == "feedback" {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    stub.recorded
        .lock()
        .documents
        .get(&(resource, id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_document(
    State(stub): State<Stub>,
    Path((resource, id)): Path<(String, Uuid)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut stored = body;
    stored["id"] = json!(Uuid::new_v4());
    stub.recorded.lock().documents.insert((resource, id), stored.clone());
    Json(stored)
}

/// Start the stub API and return its base URL.
async fn serve(stub: Stub) -> String {
    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/step", axum::routing::put(set_step))
        .route("/api/{resource}/{id}", get(get_document).put(put_document))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}/api/", addr)
}

async fn setup() -> (Stub, StudioClient) {
    let stub = Stub {
        session_id: Uuid::new_v4(),
        recorded: Arc::new(Mutex::new(Recorded::default())),
    };
    let base_url = serve(stub.clone()).await;
    (stub, StudioClient::new(base_url, Some(TOKEN.to_string())))
}

async fn open(stub: &Stub, client: StudioClient) -> WorkflowEngine {
    let user = client.current_user().await.expect("current user");
    let auth = AuthSession::new(user, Some(TOKEN.to_string()));
    WorkflowEngine::open(
        Gateways::shared(Arc::new(HttpGateway::new(client))),
        auth,
        stub.session_id,
        Capabilities::default(),
    )
    .await
    .expect("session opens")
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn resolves_the_current_user_with_a_bearer_token() {
        let (_stub, client) = setup().await;

        let user = client.current_user().await.expect("current user");

        assert_eq!(user.name, "Sam");
        assert_eq!(user.role, Role::Facilitator);
    }

    #[tokio::test]
    async fn rejects_requests_without_a_token() {
        let (_stub, client) = setup().await;
        let anonymous = StudioClient::new(client.base_url(), None);

        let result = anonymous.current_user().await;

        assert!(matches!(result, Err(ClientError::Unauthorized)));
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn out_of_range_step_from_the_server_is_clamped() {
        let (stub, client) = setup().await;

        let engine = open(&stub, client).await;

        assert_eq!(engine.current_step(), 5);
    }

    #[tokio::test]
    async fn missing_session_redirects() {
        let (_stub, client) = setup().await;
        let user = client.current_user().await.expect("current user");

        let err = WorkflowEngine::open(
            Gateways::shared(Arc::new(HttpGateway::new(client))),
            AuthSession::new(user, None),
            Uuid::new_v4(),
            Capabilities::default(),
        )
        .await
        .err()
        .expect("open fails");

        assert_eq!(err.redirect(), Some(Redirect::ProjectList));
    }
}

mod documents {
    use super::*;

    #[tokio::test]
    async fn unknown_document_loads_fresh_and_saves_with_session_id() {
        let (stub, client) = setup().await;
        let engine = open(&stub, client).await;

        let board = engine.ideas_board().await;
        assert_eq!(board.last_load(), Some(LoadOutcome::Fresh));

        board.add_idea("Guest checkout", IdeaCategory::MustHave, "#FFF9C4");
        assert_eq!(board.persist().await, PersistOutcome::Saved);

        let saved = stub
            .recorded
            .lock()
            .documents
            .get(&("ideas-boards".to_string(), stub.session_id))
            .cloned()
            .expect("document saved");
        assert_eq!(saved["session_id"], json!(stub.session_id));
        assert_eq!(saved["ideas"][0]["category"], json!("Must Have"));

        let reloaded = engine.ideas_board().await;
        assert_eq!(reloaded.last_load(), Some(LoadOutcome::Loaded));
        assert_eq!(reloaded.snapshot(), board.snapshot());
    }

    #[tokio::test]
    async fn server_error_on_fetch_starts_empty() {
        let (stub, client) = setup().await;
        let engine = open(&stub, client).await;

        let feedback = engine.feedback().await;

        assert_eq!(feedback.last_load(), Some(LoadOutcome::Failed));
        assert!(feedback.snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn next_writes_the_following_step() {
        let (stub, client) = setup().await;
        let engine = open(&stub, client).await;
        let tree = engine.problem_tree().await;
        tree.set_core_problem("Users abandon checkout");

        let advance = engine.advance(&tree).await;

        assert_eq!(advance.persisted, PersistOutcome::Saved);
        assert!(advance.write.acknowledged().await);
        assert_eq!(stub.recorded.lock().steps, vec![(stub.session_id, 2)]);
    }
}
