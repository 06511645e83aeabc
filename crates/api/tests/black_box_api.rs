use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use railstock_catalog::InMemoryComponentStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod) over the in-memory store, but bind
        // to an ephemeral port.
        let app = railstock_api::app::build_app(Arc::new(InMemoryComponentStore::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_component(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    unique_number: &str,
    can_assign_quantity: bool,
    quantity: Option<i64>,
) -> reqwest::Response {
    client
        .post(format!("{}/components", base_url))
        .json(&json!({
            "name": name,
            "uniqueNumber": unique_number,
            "canAssignQuantity": can_assign_quantity,
            "quantity": quantity,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_get_round_trips_the_assigned_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = create_component(&client, &srv.base_url, "Bolt", "BLT321", true, Some(5)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["quantity"], 5);

    let res = client
        .get(format!("{}/components/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["name"], "Bolt");
    assert_eq!(fetched["uniqueNumber"], "BLT321");
    assert_eq!(fetched["quantity"], 5);
}

#[tokio::test]
async fn create_discards_quantity_for_non_assignable_components() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = create_component(&client, &srv.base_url, "Engine", "ENG999", false, Some(7)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["quantity"], serde_json::Value::Null);

    let id = created["id"].as_i64().unwrap();
    let fetched: serde_json::Value = client
        .get(format!("{}/components/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["quantity"], serde_json::Value::Null);
}

#[tokio::test]
async fn create_validates_input_before_storing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Blank name.
    let res = create_component(&client, &srv.base_url, "   ", "BLT321", false, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Assignable without a quantity.
    let res = create_component(&client, &srv.base_url, "Bolt", "BLT321", true, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Assignable with a non-positive quantity.
    let res = create_component(&client, &srv.base_url, "Bolt", "BLT321", true, Some(0)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn duplicate_unique_number_is_a_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = create_component(&client, &srv.base_url, "Door", "DR123", true, Some(1)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = create_component(&client, &srv.base_url, "Back Door", "DR123", false, None).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_unique_number");
}

#[tokio::test]
async fn get_of_unknown_component_is_not_found() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/components/404", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_filters_by_search_term_and_reports_totals() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_component(&client, &srv.base_url, "Door", "DR123", true, Some(1)).await;
    create_component(&client, &srv.base_url, "Window", "WIN567", true, Some(1)).await;

    let res = client
        .get(format!("{}/components?searchTerm=Door", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["items"][0]["uniqueNumber"], "DR123");

    // The default page envelope reflects the unfiltered table.
    let page: serde_json::Value = client
        .get(format!("{}/components", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["pageNumber"], 1);
    assert_eq!(page["pageSize"], 10);
}

#[tokio::test]
async fn listing_rejects_out_of_range_paging_parameters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/components?pageNumber=0", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/components?pageSize=0", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quantity_update_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value =
        create_component(&client, &srv.base_url, "Bolt", "BLT321", true, Some(5))
            .await
            .json()
            .await
            .unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/components/{}/quantity", srv.base_url, id))
        .json(&9)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let fetched: serde_json::Value = client
        .get(format!("{}/components/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["quantity"], 9);

    // Non-positive quantities are rejected and leave the value untouched.
    let res = client
        .put(format!("{}/components/{}/quantity", srv.base_url, id))
        .json(&0)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown ids are not found.
    let res = client
        .put(format!("{}/components/404/quantity", srv.base_url))
        .json(&5)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quantity_update_is_rejected_for_non_assignable_components() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value =
        create_component(&client, &srv.base_url, "Engine", "ENG999", false, None)
            .await
            .json()
            .await
            .unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/components/{}/quantity", srv.base_url, id))
        .json(&5)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_the_component_and_reports_unknown_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value =
        create_component(&client, &srv.base_url, "Door", "DR123", true, Some(1))
            .await
            .json()
            .await
            .unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = client
        .delete(format!("{}/components/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/components/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Deleting a nonexistent id is a 404 and leaves the table unchanged.
    let res = client
        .delete(format!("{}/components/404", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let page: serde_json::Value = client
        .get(format!("{}/components", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 0);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}
