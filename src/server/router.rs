//! Router builder utilities for invoice routes

use crate::server::handlers::{InvoiceAppState, create_invoice, delete_invoice, update_invoice};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build the invoice form routes under the actions' listing path
///
/// With the default listing path:
/// - POST /dashboard/invoices - Create an invoice
/// - POST /dashboard/invoices/{id}/edit - Update an invoice
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
pub fn build_invoice_routes(state: InvoiceAppState) -> Router {
    let listing = state.actions.listing_path().to_string();

    Router::new()
        .route(&listing, post(create_invoice))
        .route(&format!("{}/{{id}}/edit", listing), post(update_invoice))
        .route(&format!("{}/{{id}}/delete", listing), post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
