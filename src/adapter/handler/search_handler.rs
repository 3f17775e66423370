use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::domain::entity::search::SearchRequest;
use crate::error::SearchError;
use crate::usecase::{SearchInput, SearchUseCase};

#[derive(Clone)]
pub struct AppState {
    pub search_uc: Arc<SearchUseCase>,
}

// --- Request DTOs ---

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    /// 検索語。歴史的経緯で q と qt の両方を受け付ける。
    pub q: Option<String>,
    pub qt: Option<String>,
    /// 検索対象インデックス名。
    pub i: Option<String>,
}

// --- Handlers ---

pub async fn healthcheck() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": "search-gateway"}))
}

/// GET /search?q=<term>&i=<index>
/// フィールド指定が無いため、設定のデフォルトフィールドで検索する。
pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
    headers: HeaderMap,
) -> Response {
    let term = params.q.or(params.qt).unwrap_or_default();
    let index = params.i.unwrap_or_default();

    if term.is_empty() || index.is_empty() {
        warn!("search rejected: missing query term or index");
        return error_response(&SearchError::InvalidInput(
            "query parameters q (or qt) and i are required".to_string(),
        ));
    }

    let input = SearchInput {
        search_term: term,
        index,
        fields: Vec::new(),
        user_agent: user_agent_of(&headers),
    };
    run_search(&state, &input).await
}

/// POST /search - JSON ボディ {searchTerm, index, fields[]}。
pub async fn search_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Response {
    if req.search_term.is_empty() || req.index.is_empty() {
        warn!("search rejected: empty searchTerm or index in body");
        return error_response(&SearchError::InvalidInput(
            "searchTerm and index must be non-empty".to_string(),
        ));
    }

    let input = SearchInput {
        search_term: req.search_term,
        index: req.index,
        fields: req.fields,
        user_agent: user_agent_of(&headers),
    };
    run_search(&state, &input).await
}

async fn run_search(state: &AppState, input: &SearchInput) -> Response {
    match state.search_uc.execute(input).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            // 検索自体は成功しているため、クエリ側のエラーとは区別して内部エラー扱いにする
            Err(e) => error_response(&SearchError::Internal(format!(
                "failed to serialize search results: {}",
                e
            ))),
        },
        Err(e) => error_response(&e),
    }
}

fn user_agent_of(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

fn error_response(err: &SearchError) -> Response {
    let status = match err {
        SearchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        SearchError::Engine { .. } => StatusCode::BAD_GATEWAY,
        SearchError::Transport(_) | SearchError::Decode(_) | SearchError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}
