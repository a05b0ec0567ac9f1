//! wiremock fixtures shared by the resolver and import tests.

use saleor_etl_client::CatalogClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn catalog_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&format!("{}/graphql/", server.uri()), "test-token", 5)
        .expect("client construction should not fail")
}

/// Category search for `name` answering with one exact match, or none.
pub(crate) async fn mock_category_search(server: &MockServer, name: &str, id: Option<&str>) {
    let edges: Vec<_> = id
        .map(|id| json!({ "node": { "id": id, "name": name } }))
        .into_iter()
        .collect();
    Mock::given(method("POST"))
        .and(body_string_contains("categories(first: 100"))
        .and(body_partial_json(json!({ "variables": { "search": name } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "categories": { "edges": edges } }
        })))
        .mount(server)
        .await;
}

/// `categoryCreate` for `name` under `parent`, expected exactly `times` times.
pub(crate) async fn mock_category_create(
    server: &MockServer,
    name: &str,
    parent: Option<&str>,
    id: &str,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_string_contains("categoryCreate(input: $input"))
        .and(body_partial_json(json!({
            "variables": { "input": { "name": name }, "parent": parent }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "categoryCreate": { "category": { "id": id }, "productErrors": [] } }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Product type search answering with `Car Parts` when `id` is given.
pub(crate) async fn mock_product_type_search(server: &MockServer, id: Option<&str>) {
    let edges: Vec<_> = id
        .map(|id| json!({ "node": { "id": id, "name": "Car Parts" } }))
        .into_iter()
        .collect();
    Mock::given(method("POST"))
        .and(body_string_contains("productTypes(first: 100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "productTypes": { "edges": edges } }
        })))
        .mount(server)
        .await;
}

/// `productCreate` for `sku` rejected with a `UNIQUE` field error.
pub(crate) async fn mock_create_conflict(server: &MockServer, sku: &str, times: u64) {
    Mock::given(method("POST"))
        .and(body_string_contains("productCreate(input: $input)"))
        .and(body_partial_json(json!({ "variables": { "input": { "sku": sku } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "productCreate": {
                    "product": null,
                    "productErrors": [{
                        "field": "sku",
                        "message": "Product with this Sku already exists.",
                        "code": "UNIQUE"
                    }]
                }
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// `productCreate` for `sku` succeeding with product id `id`.
pub(crate) async fn mock_create_ok(server: &MockServer, sku: &str, id: &str, times: u64) {
    Mock::given(method("POST"))
        .and(body_string_contains("productCreate(input: $input)"))
        .and(body_partial_json(json!({ "variables": { "input": { "sku": sku } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "productCreate": {
                    "product": { "id": id, "name": "created" },
                    "productErrors": []
                }
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Product search for `sku`; `hit` is the id of a product carrying it.
pub(crate) async fn mock_sku_search(server: &MockServer, sku: &str, hit: Option<&str>, times: u64) {
    let edges: Vec<_> = hit
        .map(|id| json!({ "node": { "id": id, "variants": [{ "sku": sku }] } }))
        .into_iter()
        .collect();
    Mock::given(method("POST"))
        .and(body_string_contains("products(first: 100"))
        .and(body_partial_json(json!({ "variables": { "search": sku } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": edges } }
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// `productUpdate` of product `id`, answering with `name`.
pub(crate) async fn mock_update(server: &MockServer, id: &str, name: &str, times: u64) {
    Mock::given(method("POST"))
        .and(body_string_contains("productUpdate(id: $id, input: $input)"))
        .and(body_partial_json(json!({ "variables": { "id": id } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "productUpdate": {
                    "product": { "id": id, "name": name },
                    "productErrors": []
                }
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}
