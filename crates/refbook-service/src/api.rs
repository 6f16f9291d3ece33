//! HTTP boundary.
//!
//! ## Endpoints
//!
//! - `GET /refbooks/?date=YYYY-MM-DD` - list refbooks
//! - `GET /refbooks/:id/elements?version=` - elements of a version
//! - `GET /refbooks/:id/check_element?code=&value=&version=` - element existence
//! - `GET /health` - liveness probe
//!
//! Errors are returned as `{"detail": "..."}` with the status code of the
//! corresponding [`LookupError`]. A repeated query parameter takes its last
//! value.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    response::Json,
    routing::get,
    Router,
};
use refbook_types::{ElementEntry, RefbookId, RefbookSummary};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::{LookupError, LookupResult};
use crate::server::RefbookServer;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Decoded query string. For a repeated key the last value wins.
#[derive(Debug, Default, Clone)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Builds params from decoded pairs in query-string order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
    type Rejection = LookupError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| LookupError::InvalidQuery {
                reason: rejection.body_text(),
            })?;
        Ok(Self::from_pairs(pairs))
    }
}

/// Query params for the refbook list.
#[derive(Debug, Default, Deserialize)]
pub struct RefbookListQuery {
    /// Optional `YYYY-MM-DD` date.
    pub date: Option<String>,
}

impl From<QueryParams> for RefbookListQuery {
    fn from(mut params: QueryParams) -> Self {
        Self { date: params.take("date") }
    }
}

/// Query params for the element list.
#[derive(Debug, Default, Deserialize)]
pub struct ElementListQuery {
    /// Optional version label.
    pub version: Option<String>,
}

impl From<QueryParams> for ElementListQuery {
    fn from(mut params: QueryParams) -> Self {
        Self { version: params.take("version") }
    }
}

/// Query params for the element check.
#[derive(Debug, Default, Deserialize)]
pub struct CheckElementQuery {
    /// Element code (required).
    pub code: Option<String>,
    /// Element value (required).
    pub value: Option<String>,
    /// Optional version label.
    pub version: Option<String>,
}

impl From<QueryParams> for CheckElementQuery {
    fn from(mut params: QueryParams) -> Self {
        Self {
            code: params.take("code"),
            value: params.take("value"),
            version: params.take("version"),
        }
    }
}

/// Response of `GET /refbooks/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefbookListResponse {
    /// Refbook summaries in id order.
    pub refbooks: Vec<RefbookSummary>,
}

/// Response of `GET /refbooks/:id/elements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementListResponse {
    /// Elements of the resolved version.
    pub elements: Vec<ElementEntry>,
}

/// Response of `GET /refbooks/:id/check_element`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckElementResponse {
    /// Whether the code/value pair exists.
    pub exists: bool,
}

// ============================================================================
// Router
// ============================================================================

/// Builds the HTTP router over a lookup server.
pub fn router(server: RefbookServer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/refbooks", get(list_refbooks))
        .route("/refbooks/", get(list_refbooks))
        .route("/refbooks/:id/elements", get(get_elements))
        .route("/refbooks/:id/check_element", get(check_element))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /refbooks/
async fn list_refbooks(
    State(server): State<RefbookServer>,
    params: QueryParams,
) -> LookupResult<Json<RefbookListResponse>> {
    let query = RefbookListQuery::from(params);
    let refbooks = server.list_refbooks(query.date.as_deref())?;
    Ok(Json(RefbookListResponse { refbooks }))
}

/// GET /refbooks/:id/elements
async fn get_elements(
    State(server): State<RefbookServer>,
    Path(id): Path<String>,
    params: QueryParams,
) -> LookupResult<Json<ElementListResponse>> {
    let query = ElementListQuery::from(params);
    let refbook_id = parse_refbook_id(&id)?;
    let elements = server.get_elements(refbook_id, query.version.as_deref())?;
    Ok(Json(ElementListResponse { elements }))
}

/// GET /refbooks/:id/check_element
async fn check_element(
    State(server): State<RefbookServer>,
    Path(id): Path<String>,
    params: QueryParams,
) -> LookupResult<Json<CheckElementResponse>> {
    let query = CheckElementQuery::from(params);
    let refbook_id = parse_refbook_id(&id)?;
    let exists = server.check_element(
        refbook_id,
        query.code.as_deref(),
        query.value.as_deref(),
        query.version.as_deref(),
    )?;
    Ok(Json(CheckElementResponse { exists }))
}

/// Only plain decimal ids name a refbook; anything else cannot exist.
fn parse_refbook_id(raw: &str) -> LookupResult<RefbookId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LookupError::RefbookNotFound { id: raw.to_string() });
    }
    raw.parse()
        .map_err(|_| LookupError::RefbookNotFound { id: raw.to_string() })
}
