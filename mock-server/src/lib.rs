use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Body returned by `/echo`: everything the server saw about the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateWidget {
    pub name: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Widget>>>;

/// Truncated JSON served by `/malformed`.
pub const MALFORMED_BODY: &str = r#"{"ok":tr"#;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .route("/widgets", get(list_widgets).post(create_widget))
        .route("/widgets/{id}", get(get_widget).delete(delete_widget))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Echo>, StatusCode> {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?
    };

    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        seen.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    Ok(Json(Echo {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query,
        headers: seen,
        body,
    }))
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(serde_json::json!({ "status": code }))))
}

async fn malformed() -> &'static str {
    MALFORMED_BODY
}

async fn list_widgets(State(db): State<Db>) -> Json<Vec<Widget>> {
    let widgets = db.read().await;
    Json(widgets.values().cloned().collect())
}

async fn create_widget(
    State(db): State<Db>,
    Json(input): Json<CreateWidget>,
) -> (StatusCode, Json<Widget>) {
    let widget = Widget {
        id: Uuid::new_v4(),
        name: input.name,
    };
    db.write().await.insert(widget.id, widget.clone());
    (StatusCode::CREATED, Json(widget))
}

async fn get_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Widget>, StatusCode> {
    let widgets = db.read().await;
    widgets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_widget(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut widgets = db.write().await;
    widgets.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
