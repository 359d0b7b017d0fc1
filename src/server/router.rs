//! Route table for the library API

use super::handlers::{
    AppState, block_author_create, create_author, create_author_collection, delete_author,
    get_author, get_authors, get_book_for_author, get_books_for_author,
};
use axum::{Json, Router, routing::get, routing::post};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the full application router
///
/// - GET /health, /healthz - Liveness probe
/// - GET, POST /api/authors - Paged and shaped listing, creation
/// - GET, POST, DELETE /api/authors/{id}
/// - GET /api/authors/{id}/books
/// - GET /api/authors/{id}/books/{book_id}
/// - POST /api/authorcollections
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/authors", get(get_authors).post(create_author))
        .route(
            "/api/authors/{id}",
            get(get_author)
                .post(block_author_create)
                .delete(delete_author),
        )
        .route("/api/authors/{id}/books", get(get_books_for_author))
        .route(
            "/api/authors/{id}/books/{book_id}",
            get(get_book_for_author),
        )
        .route("/api/authorcollections", post(create_author_collection))
        .with_state(state);

    health_routes().merge(api).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        ),
    )
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "shaping-rs"
    }))
}
