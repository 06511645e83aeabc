//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use railstock_catalog::{ComponentStore, InventoryService};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router around the given store (public entrypoint used
/// by `main.rs` and the black-box tests).
pub fn build_app(store: Arc<dyn ComponentStore>) -> Router {
    let service = Arc::new(InventoryService::new(store));

    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_log))
            .layer(Extension(service)),
    )
}
