use crate::cli::Args;
use crate::models::message::Message;
use crate::server::resp::{ Envelope, RespCode };
use crate::store::ListStore;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use axum::{
    routing::{ get, post, delete },
    Router,
    Json,
    Form,
    extract::{ State, Query, Request, FromRequest, rejection::QueryRejection },
    middleware::{ self, Next },
    response::{ IntoResponse, Response },
    http::{ header, StatusCode },
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, debug, error };

const DEFAULT_OFFSET: &str = "0";
const DEFAULT_LIMIT: &str = "1000";

#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ListStore>,
    message_key: String,
    version: VersionInfo,
}

impl AppState {
    pub fn new(store: Arc<dyn ListStore>, args: &Args) -> Self {
        Self {
            store,
            message_key: args.message_key.clone(),
            version: VersionInfo {
                env: args.node_env.clone(),
                version: args.app_version.clone(),
                port: args.port,
            },
        }
    }
}

#[derive(Serialize)]
struct MessagesResponse {
    #[serde(flatten)]
    envelope: Envelope,
    messages: Vec<String>,
    counts: i64,
}

/// A validated `offset`/`limit` pair from the list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, RespCode> {
        let offset = single_param(pairs, "offset", DEFAULT_OFFSET)?;
        let limit = single_param(pairs, "limit", DEFAULT_LIMIT)?;
        Ok(Self {
            offset: parse_number(offset).ok_or(RespCode::ParamInputFormateError)?,
            limit: parse_number(limit).ok_or(RespCode::ParamInputFormateError)?,
        })
    }

    /// Inclusive store range covering this page, `None` when the page is empty.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        if self.limit <= 0 {
            return None;
        }
        Some((self.offset, self.offset.saturating_add(self.limit - 1)))
    }
}

fn single_param<'a>(
    pairs: &'a [(String, String)],
    name: &str,
    default: &'a str
) -> Result<&'a str, RespCode> {
    let nested = format!("{}[", name);
    if pairs.iter().any(|(k, _)| k.starts_with(&nested)) {
        return Err(RespCode::ParamInputFormateError);
    }
    let mut values = pairs
        .iter()
        .filter(|(k, _)| k == name)
        .map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (None, _) => Ok(default),
        (Some(v), None) => Ok(if v.is_empty() { default } else { v }),
        (Some(_), Some(_)) => Err(RespCode::ParamInputFormateError),
    }
}

/// Whole numbers only; a blank value reads as zero, exponent notation and
/// unsigned `0x`/`0o`/`0b` literals are allowed.
fn parse_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Some(v) = parse_radix(trimmed) {
        return v;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let v: f64 = trimmed.parse().ok()?;
    if !v.is_finite() || v.fract() != 0.0 || v.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

/// `Some(..)` when `raw` carries a radix prefix, holding the parsed value if valid.
fn parse_radix(raw: &str) -> Option<Option<i64>> {
    let prefix = raw.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    Some(i64::from_str_radix(digits, radix).ok())
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)?.as_str().filter(|s| !s.is_empty())
}

fn envelope(code: RespCode) -> Response {
    Json(Envelope::from(code)).into_response()
}

fn exception(err: impl Display) -> Response {
    error!("Store operation failed: {}", err);
    envelope(RespCode::ExceptionError)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();
    let response = next.run(req).await;
    info!("{} {} {} {:?}", method, path, response.status().as_u16(), started.elapsed());
    response
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/messages", get(list_messages_handler))
        .route("/message", post(post_message_handler).delete(clear_messages_handler))
        .route("/all", delete(flush_all_handler))
        .with_state(state)
}

/// The full application: routes under `/api` with CORS and request logging.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes(state))
        .layer(cors)
        .layer(middleware::from_fn(log_request))
}

async fn version_handler(State(state): State<AppState>) -> Json<VersionInfo> {
    Json(state.version.clone())
}

async fn list_messages_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            debug!("Rejected list query: {}", e);
            return envelope(RespCode::ParamInputFormateError);
        }
    };
    let page = match Page::from_query(&pairs) {
        Ok(page) => page,
        Err(code) => return envelope(code),
    };

    let messages = match page.bounds() {
        Some((start, stop)) => match state.store.range_read(&state.message_key, start, stop).await {
            Ok(messages) => messages,
            Err(e) => return exception(e),
        },
        None => Vec::new(),
    };
    let counts = match state.store.length(&state.message_key).await {
        Ok(n) => n,
        Err(e) => return exception(e),
    };

    Json(MessagesResponse {
        envelope: RespCode::Success.into(),
        messages,
        counts,
    }).into_response()
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/x-www-form-urlencoded"))
}

/// Reads `message` and `user` from a url-encoded form or a JSON body.
/// `None` unless both are present, strings and non-empty.
async fn read_submission(req: Request, state: &AppState) -> Option<(String, String)> {
    let (message, user) = if is_form(&req) {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await.ok()?;
        (fields.get("message").cloned(), fields.get("user").cloned())
    } else {
        let Json(body) = Json::<Value>::from_request(req, state).await.ok()?;
        (
            non_empty_str(&body, "message").map(str::to_owned),
            non_empty_str(&body, "user").map(str::to_owned),
        )
    };
    match (message, user) {
        (Some(message), Some(user)) if !message.is_empty() && !user.is_empty() => Some((message, user)),
        _ => None,
    }
}

async fn post_message_handler(State(state): State<AppState>, req: Request) -> Response {
    let Some((message, user)) = read_submission(req, &state).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let msg = Message::new(message, user);
    let json = match serde_json::to_string(&msg) {
        Ok(json) => json,
        Err(e) => return exception(e),
    };
    match state.store.append(&state.message_key, &json).await {
        Ok(_) => envelope(RespCode::Success),
        Err(e) => exception(e),
    }
}

async fn clear_messages_handler(State(state): State<AppState>) -> Response {
    match state.store.delete_key(&state.message_key).await {
        Ok(removed) => {
            debug!("Cleared message list ({} key removed)", removed);
            envelope(RespCode::Success)
        }
        Err(e) => exception(e),
    }
}

async fn flush_all_handler(State(state): State<AppState>) -> Response {
    match state.store.flush_all().await {
        Ok(()) => {
            info!("Store flushed");
            envelope(RespCode::Success)
        }
        Err(e) => exception(e),
    }
}
