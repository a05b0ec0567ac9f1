//! Catalog GraphQL request and response types.
//!
//! Every response arrives in the standard `{"data": ..., "errors": [...]}`
//! envelope; [`GraphQLResponse`] captures that generically. Mutations report
//! validation failures in a `productErrors` list next to the affected node,
//! which [`MutationPayload`] models for products, categories and product
//! types alike.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saleor_etl_core::{ProductInput, SeoInput, Weight};

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

/// A top-level GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// A validation error attached to a mutation result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: Option<String>,
    pub code: String,
}

impl FieldError {
    /// Codes the catalog uses when the record already exists.
    const CONFLICT_CODES: [&'static str; 2] = ["UNIQUE", "ALREADY_EXISTS"];

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        Self::CONFLICT_CODES.contains(&self.code.as_str())
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message.as_deref().unwrap_or("no message");
        match &self.field {
            Some(field) => write!(f, "{field}: {message} ({})", self.code),
            None => write!(f, "{message} ({})", self.code),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared shapes
// ---------------------------------------------------------------------------

/// Relay-style connection returned by the search queries.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// `{ id name }` selection used for categories and product types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NodeId {
    pub id: String,
}

/// Result object of `productCreate`, `productUpdate`, `categoryCreate` and
/// `productTypeCreate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationPayload<T> {
    #[serde(alias = "product", alias = "category", alias = "productType")]
    pub node: Option<T>,
    #[serde(default)]
    pub product_errors: Vec<FieldError>,
}

// ---------------------------------------------------------------------------
// product(id)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<ProductDetail>,
}

/// Full detail for a single catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub charge_taxes: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub product_type: Option<NamedNode>,
    #[serde(default)]
    pub category: Option<NamedNode>,
    #[serde(default)]
    pub weight: Option<Weight>,
    #[serde(default)]
    pub base_price: Option<Money>,
    #[serde(default)]
    pub variants: Vec<VariantDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDetail {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductDetail {
    /// Rebuilds an update payload from the product as the catalog stores it.
    ///
    /// The SKU is taken from the first variant carrying one. Inventory
    /// tracking is not part of the detail selection and is left off.
    #[must_use]
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            sku: self
                .variants
                .iter()
                .find_map(|v| v.sku.clone().filter(|s| !s.is_empty())),
            charge_taxes: self.charge_taxes,
            is_published: self.is_published,
            track_inventory: false,
            category: self.category.as_ref().map(|c| c.id.clone()),
            base_price: self.base_price.as_ref().map(|m| m.amount),
            weight: self.weight.clone(),
            seo: Some(SeoInput {
                title: self.seo_title.clone(),
                description: self.seo_description.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Searches
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<ProductSkuNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductSkuNode {
    pub id: String,
    #[serde(default)]
    pub variants: Vec<VariantSku>,
}

#[derive(Debug, Deserialize)]
pub struct VariantSku {
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesData {
    pub categories: Connection<NamedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypesData {
    pub product_types: Connection<NamedNode>,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateData {
    pub product_create: MutationPayload<NamedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateData {
    pub product_update: MutationPayload<NamedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreateData {
    pub category_create: MutationPayload<NodeId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeCreateData {
    pub product_type_create: MutationPayload<NodeId>,
}

/// `ProductCreateInput`: the mapped product plus the product type it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreateInput<'a> {
    pub product_type: &'a str,
    #[serde(flatten)]
    pub product: &'a ProductInput,
}

/// The fixed subset of fields re-sent by `productUpdate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductUpdateInput<'a> {
    pub category: &'a str,
    pub charge_taxes: bool,
    pub is_published: bool,
    pub name: &'a str,
    pub base_price: Decimal,
    pub tax_code: &'a str,
    pub seo: SeoUpdate<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SeoUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
}
