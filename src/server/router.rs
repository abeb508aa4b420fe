//! Route table of the quotes API

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_quote, delete_quote, get_quote, health_check, list_contact_quotes,
    list_deal_quotes, list_quotes, update_quote,
};

/// Build the quote routes
///
/// - GET /health, /healthz - Liveness
/// - GET /quotes - List quotes (`search` and `status` query filters)
/// - POST /quotes - Create a quote
/// - GET /quotes/{id} - Get one quote
/// - PUT /quotes/{id} - Update a quote
/// - DELETE /quotes/{id} - Delete a quote
/// - GET /contacts/{id}/quotes - Quotes addressed to a contact
/// - GET /deals/{id}/quotes - Quotes attached to a deal
pub fn build_quote_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/quotes", get(list_quotes).post(create_quote))
        .route(
            "/quotes/{id}",
            get(get_quote).put(update_quote).delete(delete_quote),
        )
        .route("/contacts/{id}/quotes", get(list_contact_quotes))
        .route("/deals/{id}/quotes", get(list_deal_quotes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
