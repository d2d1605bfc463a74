//! In-process fake of the controller REST API

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vsdk_rest::SessionConfig;

pub const PASSWORD: &str = "secret";
pub const API_KEY: &str = "key-123";
pub const ROOT_ID: &str = "me-1";

/// `Basic base64("csproot:secret")`
const PASSWORD_AUTH: &str = "Basic Y3Nwcm9vdDpzZWNyZXQ=";
/// `Basic base64("csproot:key-123")`
const API_KEY_AUTH: &str = "Basic Y3Nwcm9vdDprZXktMTIz";

/// A request as the controller saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

#[derive(Default)]
struct Store {
    /// `(category, object)` pairs
    objects: Vec<(String, Value)>,
    requests: Vec<Recorded>,
    next_id: u32,
}

#[derive(Clone, Default)]
pub struct FakeController {
    store: Arc<Mutex<Store>>,
}

impl FakeController {
    pub fn requests(&self) -> Vec<Recorded> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }

    pub fn objects(&self, category: &str) -> Vec<Value> {
        self.store
            .lock()
            .unwrap()
            .objects
            .iter()
            .filter(|(c, _)| c == category)
            .map(|(_, o)| o.clone())
            .collect()
    }

    fn record(&self, method: Method, uri: Uri, headers: &HeaderMap) {
        self.store.lock().unwrap().requests.push(Recorded {
            method,
            uri,
            headers: headers.clone(),
        });
    }

    fn insert(&self, category: &str, mut object: Value, parent: Option<(&str, &str)>) -> Value {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        object["ID"] = json!(format!("{}-{}", category, store.next_id));
        if let Some((parent_category, parent_id)) = parent {
            object["parentID"] = json!(parent_id);
            object["parentType"] = json!(parent_category.trim_end_matches('s'));
        }
        object["owner"] = json!(ROOT_ID);
        store.objects.push((category.to_string(), object.clone()));
        object
    }

    fn find(&self, category: &str, id: &str) -> Option<Value> {
        self.objects(category)
            .into_iter()
            .find(|o| o["ID"] == id)
    }
}

/// Start the fake on an ephemeral port and return it with a session config
/// pointing at it.
pub async fn spawn() -> (FakeController, SessionConfig) {
    let controller = FakeController::default();

    let app = Router::new()
        .route("/nuage/api/v5_0/:category", get(list_root).post(create_root))
        .route(
            "/nuage/api/v5_0/:category/:id",
            get(fetch_one).put(save_one).delete(delete_one),
        )
        .route(
            "/nuage/api/v5_0/:category/:id/:child",
            get(list_children).post(create_under),
        )
        .with_state(controller.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = SessionConfig {
        url: format!("http://{}", addr),
        password: PASSWORD.to_string(),
        insecure_tls: false,
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    (controller, config)
}

fn authorized(headers: &HeaderMap, expected: &str) -> Result<(), Response> {
    let auth_ok = headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected);
    let org_ok = headers.get("x-nuage-organization").and_then(|v| v.to_str().ok()) == Some("csp");
    if auth_ok && org_ok {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({"title": "Unauthorized", "description": "Invalid credentials"})),
    )
        .into_response())
}

fn not_found(category: &str, id: &str) -> Response {
    let body = json!({
        "errors": [{
            "property": "",
            "descriptions": [{
                "title": "Object not found",
                "description": format!("Cannot find {} with ID {}", category, id),
            }]
        }],
        "internalErrorCode": 2001
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<usize> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Page a listing the way the controller does, 204 when nothing matched
fn listing(items: Vec<Value>, headers: &HeaderMap) -> Response {
    let total = items.len();
    let page = header_number(headers, "x-nuage-page").unwrap_or(0);
    let page_size = header_number(headers, "x-nuage-pagesize").unwrap_or(50);
    let page_items: Vec<Value> = items.into_iter().skip(page * page_size).take(page_size).collect();

    let mut response = if page_items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(page_items).into_response()
    };
    let reply_headers = response.headers_mut();
    reply_headers.insert("x-nuage-count", HeaderValue::from(total));
    reply_headers.insert("x-nuage-page", HeaderValue::from(page));
    response
}

async fn list_root(
    State(controller): State<FakeController>,
    Path(category): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    controller.record(method, uri, &headers);

    if category == "me" {
        if let Err(rejected) = authorized(&headers, PASSWORD_AUTH)
            .or_else(|_| authorized(&headers, API_KEY_AUTH))
        {
            return rejected;
        }
        return Json(json!([{
            "ID": ROOT_ID,
            "userName": "csproot",
            "enterpriseName": "CSP",
            "APIKey": API_KEY,
            "APIKeyExpiry": 1893456000000u64,
        }]))
        .into_response();
    }

    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }
    listing(controller.objects(&category), &headers)
}

async fn create_root(
    State(controller): State<FakeController>,
    Path(category): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }
    create(&controller, &category, body, None)
}

fn create(
    controller: &FakeController,
    category: &str,
    body: Value,
    parent: Option<(&str, &str)>,
) -> Response {
    let name = body["name"].as_str().unwrap_or_default();
    let duplicate = controller
        .objects(category)
        .iter()
        .any(|o| !name.is_empty() && o["name"] == name);
    if duplicate {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "title": "Duplicate name",
                "description": format!("Another {} named {} exists", category, name),
            })),
        )
            .into_response();
    }

    let created = controller.insert(category, body, parent);
    (StatusCode::CREATED, Json(json!([created]))).into_response()
}

async fn fetch_one(
    State(controller): State<FakeController>,
    Path((category, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }
    match controller.find(&category, &id) {
        Some(object) => Json(json!([object])).into_response(),
        None => not_found(&category, &id),
    }
}

async fn save_one(
    State(controller): State<FakeController>,
    Path((category, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }

    let mut store = controller.store.lock().unwrap();
    let Some((_, object)) = store
        .objects
        .iter_mut()
        .find(|(c, o)| *c == category && o["ID"] == id.as_str())
    else {
        return not_found(&category, &id);
    };

    if let (Some(target), Some(fields)) = (object.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    target_reply(object.clone(), &query)
}

/// `responseChoice=1` asks for the updated object instead of an empty body
fn target_reply(object: Value, query: &HashMap<String, String>) -> Response {
    if query.get("responseChoice").map(String::as_str) == Some("1") {
        Json(json!([object])).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn delete_one(
    State(controller): State<FakeController>,
    Path((category, id)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }

    let mut store = controller.store.lock().unwrap();
    let before = store.objects.len();
    store
        .objects
        .retain(|(c, o)| !(*c == category && o["ID"] == id.as_str()));
    if store.objects.len() == before {
        return not_found(&category, &id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_children(
    State(controller): State<FakeController>,
    Path((parent, parent_id, category)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }
    if controller.find(&parent, &parent_id).is_none() {
        return not_found(&parent, &parent_id);
    }

    let children = controller
        .objects(&category)
        .into_iter()
        .filter(|o| o["parentID"] == parent_id.as_str())
        .collect();
    listing(children, &headers)
}

async fn create_under(
    State(controller): State<FakeController>,
    Path((parent, parent_id, category)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    controller.record(method, uri, &headers);
    if let Err(rejected) = authorized(&headers, API_KEY_AUTH) {
        return rejected;
    }
    if controller.find(&parent, &parent_id).is_none() {
        return not_found(&parent, &parent_id);
    }
    create(&controller, &category, body, Some((&parent, &parent_id)))
}
