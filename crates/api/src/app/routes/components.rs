use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use railstock_catalog::{CreateComponent, InventoryService};
use railstock_core::ComponentId;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_components).post(create_component))
        .route("/:id", get(get_component).delete(delete_component))
        .route("/:id/quantity", put(update_quantity))
}

pub async fn list_components(
    Extension(service): Extension<Arc<InventoryService>>,
    Query(params): Query<dto::ListParams>,
) -> axum::response::Response {
    match service
        .list(
            params.search_term.as_deref(),
            params.page_number,
            params.page_size,
        )
        .await
    {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_response(page))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_component(
    Extension(service): Extension<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match service.get(ComponentId::new(id)).await {
        Ok(Some(component)) => {
            (StatusCode::OK, Json(dto::component_to_response(component))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("component {id} was not found"),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_component(
    Extension(service): Extension<Arc<InventoryService>>,
    Json(body): Json<dto::CreateComponentRequest>,
) -> axum::response::Response {
    let input = CreateComponent {
        name: body.name,
        unique_number: body.unique_number,
        can_assign_quantity: body.can_assign_quantity,
        quantity: body.quantity,
    };

    match service.create(input).await {
        Ok(component) => {
            (StatusCode::CREATED, Json(dto::component_to_response(component))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_quantity(
    Extension(service): Extension<Arc<InventoryService>>,
    Path(id): Path<i64>,
    Json(quantity): Json<i64>,
) -> axum::response::Response {
    match service.update_quantity(ComponentId::new(id), quantity).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_component(
    Extension(service): Extension<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match service.delete(ComponentId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
