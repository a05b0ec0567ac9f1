//! HTTP client for the catalog GraphQL API.
//!
//! Wraps `reqwest` with bearer-token auth, envelope decoding, and explicit
//! `productErrors` checking. Every call is a single POST; nothing is retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use saleor_etl_core::ProductInput;

use crate::error::CatalogError;
use crate::queries;
use crate::types::{
    CategoriesData, CategoryCreateData, Connection, FieldError, GraphQLResponse, NamedNode,
    ProductCreateData, ProductCreateInput, ProductData, ProductDetail, ProductTypeCreateData,
    ProductTypesData, ProductUpdateData, ProductUpdateInput, ProductsData, SeoUpdate,
};

/// Client for the catalog GraphQL endpoint.
///
/// Construct with [`CatalogClient::new`]; tests point it at a wiremock server.
pub struct CatalogClient {
    client: Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Creates a client that sends `Authorization: Bearer <token>` with every
    /// request.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidEndpoint`] if `endpoint` is not a valid URL.
    /// - [`CatalogError::InvalidToken`] if `token` is not a valid header value.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(endpoint: &str, token: &str, timeout_secs: u64) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(endpoint).map_err(|e| CatalogError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| CatalogError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("saleor-etl/0.1 (catalog-import)")
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Fetches full product detail by catalog id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingField`] if no product has this id.
    /// - [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    ///   [`CatalogError::Deserialize`] on request failure.
    pub async fn get_product(&self, id: &str) -> Result<ProductDetail, CatalogError> {
        let data: ProductData = self
            .execute("product", queries::GET_PRODUCT, json!({ "id": id }))
            .await?;
        data.product
            .ok_or_else(|| CatalogError::MissingField("product".to_string()))
    }

    /// Creates a product under `product_type_id` and returns its id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Conflict`] if a product with the same SKU exists.
    /// - [`CatalogError::FieldErrors`] for any other validation failure.
    /// - [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    ///   [`CatalogError::Deserialize`] on request failure.
    pub async fn create_product(
        &self,
        product_type_id: &str,
        product: &ProductInput,
    ) -> Result<String, CatalogError> {
        let input = ProductCreateInput {
            product_type: product_type_id,
            product,
        };
        let data: ProductCreateData = self
            .execute(
                "productCreate",
                queries::CREATE_PRODUCT,
                json!({ "input": input }),
            )
            .await?;

        let payload = data.product_create;
        check_field_errors("productCreate", payload.product_errors)?;
        payload
            .node
            .map(|p| p.id)
            .ok_or_else(|| CatalogError::MissingField("productCreate.product".to_string()))
    }

    /// Re-sends category, tax and publication flags, name, price and SEO
    /// fields of `product` to the product with id `id`.
    ///
    /// Returns a confirmation such as `"Brake Pad was updated."`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingField`] if `product` lacks a category, a price,
    ///   or either SEO field. No request is sent in that case.
    /// - [`CatalogError::FieldErrors`] / [`CatalogError::Conflict`] if the
    ///   catalog rejects the update.
    /// - [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    ///   [`CatalogError::Deserialize`] on request failure.
    pub async fn update_product(
        &self,
        id: &str,
        product: &ProductInput,
    ) -> Result<String, CatalogError> {
        let input = update_input(product)?;
        let data: ProductUpdateData = self
            .execute(
                "productUpdate",
                queries::UPDATE_PRODUCT,
                json!({ "id": id, "input": input }),
            )
            .await?;

        let payload = data.product_update;
        check_field_errors("productUpdate", payload.product_errors)?;
        let updated = payload
            .node
            .ok_or_else(|| CatalogError::MissingField("productUpdate.product".to_string()))?;
        Ok(format!("{} was updated.", updated.name))
    }

    /// Creates a category, nested under `parent` when given, and returns its id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::FieldErrors`] / [`CatalogError::Conflict`] if the
    ///   catalog rejects the category.
    /// - [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    ///   [`CatalogError::Deserialize`] on request failure.
    pub async fn create_category(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<String, CatalogError> {
        let data: CategoryCreateData = self
            .execute(
                "categoryCreate",
                queries::CREATE_CATEGORY,
                json!({ "input": { "name": name }, "parent": parent }),
            )
            .await?;

        let payload = data.category_create;
        check_field_errors("categoryCreate", payload.product_errors)?;
        payload
            .node
            .map(|c| c.id)
            .ok_or_else(|| CatalogError::MissingField("categoryCreate.category".to_string()))
    }

    /// Creates a product type without variants that requires shipping.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::FieldErrors`] / [`CatalogError::Conflict`] if the
    ///   catalog rejects the product type.
    /// - [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    ///   [`CatalogError::Deserialize`] on request failure.
    pub async fn create_product_type(&self, name: &str) -> Result<String, CatalogError> {
        let data: ProductTypeCreateData = self
            .execute(
                "productTypeCreate",
                queries::CREATE_PRODUCT_TYPE,
                json!({
                    "input": {
                        "name": name,
                        "hasVariants": false,
                        "isShippingRequired": true,
                    }
                }),
            )
            .await?;

        let payload = data.product_type_create;
        check_field_errors("productTypeCreate", payload.product_errors)?;
        payload
            .node
            .map(|t| t.id)
            .ok_or_else(|| CatalogError::MissingField("productTypeCreate.productType".to_string()))
    }

    /// Returns the id of the product whose variant SKU equals `sku` exactly,
    /// searching the first 100 results only.
    ///
    /// # Errors
    ///
    /// [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    /// [`CatalogError::Deserialize`] on request failure. No match is `Ok(None)`.
    pub async fn get_product_by_sku(&self, sku: &str) -> Result<Option<String>, CatalogError> {
        let data: ProductsData = self
            .execute("products", queries::SEARCH_PRODUCTS, json!({ "search": sku }))
            .await?;

        Ok(data
            .products
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .find(|node| {
                node.variants
                    .iter()
                    .any(|v| v.sku.as_deref() == Some(sku))
            })
            .map(|node| node.id))
    }

    /// Returns the id of the first category named exactly `name`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    /// [`CatalogError::Deserialize`] on request failure. No match is `Ok(None)`.
    pub async fn get_category_by_name(&self, name: &str) -> Result<Option<String>, CatalogError> {
        let data: CategoriesData = self
            .execute(
                "categories",
                queries::SEARCH_CATEGORIES,
                json!({ "search": name }),
            )
            .await?;
        Ok(first_named(data.categories, name))
    }

    /// Returns the id of the first product type named exactly `name`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::GraphQL`], [`CatalogError::Http`] or
    /// [`CatalogError::Deserialize`] on request failure. No match is `Ok(None)`.
    pub async fn get_product_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<String>, CatalogError> {
        let data: ProductTypesData = self
            .execute(
                "productTypes",
                queries::SEARCH_PRODUCT_TYPES,
                json!({ "search": name }),
            )
            .await?;
        Ok(first_named(data.product_types, name))
    }

    /// POSTs a GraphQL document, asserts a 2xx status, and unwraps the
    /// `data` member of the response envelope.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or a non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body does not match `T`.
    /// - [`CatalogError::GraphQL`] if the envelope carries top-level errors.
    /// - [`CatalogError::MissingField`] if `data` is absent.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, CatalogError> {
        tracing::debug!(operation, "sending catalog request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: GraphQLResponse<T> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: operation.to_string(),
                source: e,
            })?;

        if !envelope.errors.is_empty() {
            return Err(CatalogError::GraphQL(envelope.errors));
        }
        envelope
            .data
            .ok_or_else(|| CatalogError::MissingField("data".to_string()))
    }
}

/// Converts a non-empty `productErrors` list into an error, distinguishing
/// "already exists" from other validation failures.
fn check_field_errors(
    operation: &'static str,
    errors: Vec<FieldError>,
) -> Result<(), CatalogError> {
    if errors.is_empty() {
        return Ok(());
    }
    if errors.iter().any(FieldError::is_conflict) {
        return Err(CatalogError::Conflict { operation, errors });
    }
    Err(CatalogError::FieldErrors { operation, errors })
}

/// Picks the update subset out of `product`, failing on the first absent field.
fn update_input(product: &ProductInput) -> Result<ProductUpdateInput<'_>, CatalogError> {
    let missing = |field: &str| CatalogError::MissingField(field.to_string());

    let category = product.category.as_deref().ok_or_else(|| missing("category"))?;
    let base_price = product.base_price.ok_or_else(|| missing("basePrice"))?;
    let seo = product.seo.as_ref().ok_or_else(|| missing("seo"))?;
    let title = seo.title.as_deref().ok_or_else(|| missing("seo.title"))?;
    let description = seo
        .description
        .as_deref()
        .ok_or_else(|| missing("seo.description"))?;

    Ok(ProductUpdateInput {
        category,
        charge_taxes: product.charge_taxes,
        is_published: product.is_published,
        name: &product.name,
        base_price,
        tax_code: "",
        seo: SeoUpdate { title, description },
    })
}

fn first_named(connection: Connection<NamedNode>, name: &str) -> Option<String> {
    connection
        .edges
        .into_iter()
        .map(|edge| edge.node)
        .find(|node| node.name == name)
        .map(|node| node.id)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use saleor_etl_core::SeoInput;

    use super::*;
    use crate::types::Edge;

    fn product() -> ProductInput {
        ProductInput {
            name: "Brake Pad".to_string(),
            sku: Some("BP-100".to_string()),
            charge_taxes: true,
            is_published: true,
            track_inventory: false,
            category: Some("cat-pads".to_string()),
            base_price: Some(Decimal::new(2999, 2)),
            weight: None,
            seo: Some(SeoInput {
                title: Some("Brake Pad SEO".to_string()),
                description: Some("desc".to_string()),
            }),
        }
    }

    #[test]
    fn new_rejects_invalid_endpoint() {
        let result = CatalogClient::new("not a url", "token", 30);
        assert!(matches!(result, Err(CatalogError::InvalidEndpoint { .. })));
    }

    #[test]
    fn new_rejects_token_with_newline() {
        let result = CatalogClient::new("http://localhost:8000/graphql/", "bad\ntoken", 30);
        assert!(matches!(result, Err(CatalogError::InvalidToken)));
    }

    #[test]
    fn update_input_sends_fixed_subset() {
        let product = product();
        let input = update_input(&product).unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            json!({
                "category": "cat-pads",
                "chargeTaxes": true,
                "isPublished": true,
                "name": "Brake Pad",
                "basePrice": "29.99",
                "taxCode": "",
                "seo": { "title": "Brake Pad SEO", "description": "desc" }
            })
        );
    }

    #[test]
    fn update_input_requires_seo_title() {
        let mut product = product();
        product.seo = Some(SeoInput {
            title: None,
            description: Some("desc".to_string()),
        });
        let err = update_input(&product).unwrap_err();
        assert!(
            matches!(err, CatalogError::MissingField(ref f) if f == "seo.title"),
            "got: {err:?}"
        );
    }

    #[test]
    fn update_input_requires_category() {
        let mut product = product();
        product.category = None;
        assert!(matches!(
            update_input(&product),
            Err(CatalogError::MissingField(ref f)) if f == "category"
        ));
    }

    #[test]
    fn check_field_errors_separates_conflicts() {
        let unique = FieldError {
            field: Some("sku".to_string()),
            message: Some("Product with this SKU already exists.".to_string()),
            code: "UNIQUE".to_string(),
        };
        let required = FieldError {
            field: Some("name".to_string()),
            message: None,
            code: "REQUIRED".to_string(),
        };

        assert!(check_field_errors("productCreate", vec![]).is_ok());
        assert!(matches!(
            check_field_errors("productCreate", vec![required.clone(), unique]),
            Err(CatalogError::Conflict { .. })
        ));
        assert!(matches!(
            check_field_errors("productCreate", vec![required]),
            Err(CatalogError::FieldErrors { .. })
        ));
    }

    #[test]
    fn first_named_requires_exact_match() {
        let connection = Connection {
            edges: vec![
                Edge {
                    node: NamedNode {
                        id: "c1".to_string(),
                        name: "Brake Pads".to_string(),
                    },
                },
                Edge {
                    node: NamedNode {
                        id: "c2".to_string(),
                        name: "Pads".to_string(),
                    },
                },
            ],
        };
        assert_eq!(first_named(connection, "Pads").as_deref(), Some("c2"));
    }
}
