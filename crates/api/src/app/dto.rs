//! Request/response DTOs and JSON mapping helpers.
//!
//! The wire shape is camelCase, matching the catalog's existing API consumers.

use serde::{Deserialize, Serialize};

use railstock_catalog::Component;
use railstock_core::Page;

fn default_page_number() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

/// Query parameters for the paginated listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search_term: Option<String>,
    #[serde(default = "default_page_number")]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentRequest {
    pub name: String,
    pub unique_number: String,
    pub can_assign_quantity: bool,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResponse {
    pub id: i64,
    pub name: String,
    pub unique_number: String,
    pub can_assign_quantity: bool,
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    pub items: Vec<ComponentResponse>,
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

pub fn component_to_response(component: Component) -> ComponentResponse {
    ComponentResponse {
        id: component.id.as_i64(),
        name: component.name,
        unique_number: component.unique_number,
        can_assign_quantity: component.can_assign_quantity,
        quantity: component.quantity,
    }
}

pub fn page_to_response(page: Page<Component>) -> PaginatedResponse {
    PaginatedResponse {
        items: page.items.into_iter().map(component_to_response).collect(),
        total_count: page.total_count,
        page_number: page.page_number,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }
}
