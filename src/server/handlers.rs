//! HTTP handlers for quote operations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::entity::{Quote, QuoteDraft, QuoteId, RecordId};
use crate::core::error::QuoteError;
use crate::core::query::{ListParams, QuoteFilter, QuoteSummary, filter_quotes};
use crate::core::service::QuoteService;
use crate::core::validation::validate_draft;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn QuoteService>,
}

impl AppState {
    pub fn new(service: Arc<dyn QuoteService>) -> Self {
        Self { service }
    }
}

/// Response for listing endpoints
#[derive(Debug, Serialize)]
pub struct ListQuotesResponse {
    pub quotes: Vec<Quote>,
    pub count: usize,
    pub summary: QuoteSummary,
}

impl ListQuotesResponse {
    /// `summary` covers `all`, `quotes` only the filtered part
    fn new(all: &[Quote], quotes: Vec<Quote>) -> Self {
        Self {
            count: quotes.len(),
            summary: QuoteSummary::from_quotes(all),
            quotes,
        }
    }
}

/// List quotes, optionally filtered
///
/// GET /quotes?search=acme&status=Sent
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListQuotesResponse>, QuoteError> {
    let all = state.service.get_all().await?;
    let filter = QuoteFilter::from(params);
    let quotes = filter_quotes(&all, &filter);

    Ok(Json(ListQuotesResponse::new(&all, quotes)))
}

/// Create a quote
///
/// POST /quotes
pub async fn create_quote(
    State(state): State<AppState>,
    Json(draft): Json<QuoteDraft>,
) -> Result<Response, QuoteError> {
    validate_draft(&draft, Utc::now().date_naive())?;

    let quote = state.service.create(draft).await?;

    Ok((StatusCode::CREATED, Json(quote)).into_response())
}

/// GET /quotes/{id}
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<Quote>, QuoteError> {
    state
        .service
        .get_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| QuoteError::not_found(id))
}

/// Replace the editable fields of a quote
///
/// PUT /quotes/{id}
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(draft): Json<QuoteDraft>,
) -> Result<Json<Quote>, QuoteError> {
    validate_draft(&draft, Utc::now().date_naive())?;

    let quote = state.service.update(id, draft).await?;

    Ok(Json(quote))
}

/// DELETE /quotes/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Response, QuoteError> {
    state.service.delete(id).await?;

    Ok((StatusCode::NO_CONTENT, ()).into_response())
}

/// GET /contacts/{id}/quotes
pub async fn list_contact_quotes(
    State(state): State<AppState>,
    Path(contact_id): Path<RecordId>,
) -> Result<Json<ListQuotesResponse>, QuoteError> {
    let quotes = state.service.get_by_contact_id(contact_id).await?;
    Ok(Json(ListQuotesResponse::new(&quotes, quotes.clone())))
}

/// GET /deals/{id}/quotes
pub async fn list_deal_quotes(
    State(state): State<AppState>,
    Path(deal_id): Path<RecordId>,
) -> Result<Json<ListQuotesResponse>, QuoteError> {
    let quotes = state.service.get_by_deal_id(deal_id).await?;
    Ok(Json(ListQuotesResponse::new(&quotes, quotes.clone())))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "quotes"
    }))
}
