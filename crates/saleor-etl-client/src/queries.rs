//! GraphQL documents sent by [`crate::CatalogClient`].
//!
//! Searches read a single page of 100 results; matches beyond the first page
//! are not seen.

pub(crate) const GET_PRODUCT: &str = r"
query getProduct($id: ID!) {
  product(id: $id) {
    id
    name
    slug
    description
    seoTitle
    seoDescription
    isPublished
    chargeTaxes
    updatedAt
    productType { id name }
    category { id name }
    weight { unit value }
    basePrice { currency amount }
    variants { id sku name }
  }
}
";

pub(crate) const SEARCH_PRODUCTS: &str = r"
query products($search: String!) {
  products(first: 100, filter: {search: $search}) {
    edges { node { id variants { sku } } }
  }
}
";

pub(crate) const SEARCH_CATEGORIES: &str = r"
query categories($search: String!) {
  categories(first: 100, filter: {search: $search}) {
    edges { node { id name } }
  }
}
";

pub(crate) const SEARCH_PRODUCT_TYPES: &str = r"
query productTypes($search: String!) {
  productTypes(first: 100, filter: {search: $search}) {
    edges { node { id name } }
  }
}
";

pub(crate) const CREATE_PRODUCT: &str = r"
mutation productCreate($input: ProductCreateInput!) {
  productCreate(input: $input) {
    product { id name }
    productErrors { field message code }
  }
}
";

pub(crate) const UPDATE_PRODUCT: &str = r"
mutation productUpdate($id: ID!, $input: ProductInput!) {
  productUpdate(id: $id, input: $input) {
    product { id name }
    productErrors { field message code }
  }
}
";

pub(crate) const CREATE_CATEGORY: &str = r"
mutation categoryCreate($input: CategoryInput!, $parent: ID) {
  categoryCreate(input: $input, parent: $parent) {
    category { id }
    productErrors { field message code }
  }
}
";

pub(crate) const CREATE_PRODUCT_TYPE: &str = r"
mutation productTypeCreate($input: ProductTypeInput!) {
  productTypeCreate(input: $input) {
    productType { id }
    productErrors { field message code }
  }
}
";
