//! HTTP request handlers

use super::state::AppState;
use crate::search::Lookup;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tera::Context;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Character name to look up
    pub q: Option<String>,
    /// Output format ("json" for the raw state projection)
    pub format: Option<String>,
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());

    match state.templates.render_with_context("index.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Search handler: runs the full lookup sequence for a submitted query
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    // An empty or whitespace query is the query-clear transition
    let query = match params.q {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Redirect::to("/").into_response(),
    };

    let lookup = Lookup::new(state.archive.clone());
    let result = lookup.submit(&query).await;

    if params.format.as_deref() == Some("json") {
        return Json(result).into_response();
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("query", &result.query);
    ctx.insert("error", &result.error);
    ctx.insert("character", &result.character);
    ctx.insert("homeworld", &result.homeworld);
    ctx.insert("species", &result.species);
    ctx.insert("films", &result.films);

    match state.templates.render_with_context("search.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Query parameters for the character search proxy
#[derive(Debug, Deserialize)]
pub struct CharacterProxyParams {
    pub search: String,
}

/// Local proxy for the upstream character search, returning the catalog's
/// JSON body as-is
pub async fn api_characters(
    State(state): State<AppState>,
    Query(params): Query<CharacterProxyParams>,
) -> Response {
    match state.archive.search_characters(&params.search).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::warn!("Character proxy request failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
