//! Spreadsheet import: stage every row, then create or update products one
//! at a time.
//!
//! A failing row is logged and counted; it never stops the rows after it.
//! Nothing is rolled back, so an interrupted run leaves the catalog partly
//! imported.

use saleor_etl_client::{CatalogClient, CatalogError};
use saleor_etl_core::{map_row, AppConfig, CategoryPathError, ImportRow, ProductInput};
use thiserror::Error;

use crate::resolve::resolve_category;

#[derive(Debug, Error)]
pub(crate) enum ImportError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    CategoryPath(#[from] CategoryPathError),

    /// Creation reported the SKU as taken, yet the SKU search (first 100
    /// results) returned no product carrying it.
    #[error("product with SKU {sku} already exists but could not be found by SKU")]
    ConflictWithoutMatch { sku: String },
}

/// A mapped row waiting to be submitted.
#[derive(Debug)]
pub(crate) struct StagedProduct {
    pub row: usize,
    pub sku: String,
    pub input: ProductInput,
}

#[derive(Debug)]
pub(crate) enum RowOutcome {
    Created { id: String },
    Updated { message: String },
}

/// Counts reported at the end of a run. `failed` covers rows that could not
/// be staged as well as rows the catalog rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub staged: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Drives one import run against the catalog.
pub(crate) struct Importer<'a> {
    client: &'a CatalogClient,
    config: &'a AppConfig,
}

impl<'a> Importer<'a> {
    pub(crate) fn new(client: &'a CatalogClient, config: &'a AppConfig) -> Self {
        Self { client, config }
    }

    /// Imports `rows`: ensures the product type, stages the batch, then
    /// submits each staged product in order.
    ///
    /// # Errors
    ///
    /// Only when the product type can be neither found nor created. Row-level
    /// failures are counted in the summary instead.
    pub(crate) async fn run<I>(&self, rows: I) -> Result<ImportSummary, ImportError>
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let product_type_id = self.ensure_product_type().await?;

        let mut summary = ImportSummary::default();
        let batch = self.stage(rows, &mut summary).await;
        summary.staged = batch.len();

        for staged in &batch {
            match self.submit(&product_type_id, staged).await {
                Ok(RowOutcome::Created { id }) => {
                    summary.created += 1;
                    tracing::info!(row = staged.row, sku = %staged.sku, %id, "product created");
                }
                Ok(RowOutcome::Updated { message }) => {
                    summary.updated += 1;
                    tracing::info!(row = staged.row, sku = %staged.sku, "{message}");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        row = staged.row,
                        sku = %staged.sku,
                        error = %e,
                        "failed to import product"
                    );
                }
            }
        }

        tracing::info!(
            staged = summary.staged,
            created = summary.created,
            updated = summary.updated,
            failed = summary.failed,
            "import finished"
        );
        Ok(summary)
    }

    /// Returns the id of the configured product type, creating it if the
    /// catalog has none by that exact name.
    async fn ensure_product_type(&self) -> Result<String, ImportError> {
        let name = &self.config.product_type_name;
        if let Some(id) = self.client.get_product_type_by_name(name).await? {
            tracing::debug!(product_type = %name, %id, "using existing product type");
            return Ok(id);
        }
        tracing::info!(product_type = %name, "creating product type");
        Ok(self.client.create_product_type(name).await?)
    }

    /// Resolves categories and maps each row into the in-memory batch.
    async fn stage<I>(&self, rows: I, summary: &mut ImportSummary) -> Vec<StagedProduct>
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let mut batch = Vec::new();
        for row in rows {
            match resolve_category(self.client, &row.category_path).await {
                Ok(category_id) => batch.push(StagedProduct {
                    row: row.row,
                    sku: row.sku.clone(),
                    input: map_row(&row, &category_id),
                }),
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        row = row.row,
                        sku = %row.sku,
                        category = %row.category_path,
                        error = %e,
                        "failed to resolve category"
                    );
                }
            }
        }
        batch
    }

    /// Creates the product, or updates the existing one when the catalog
    /// reports its SKU as taken.
    async fn submit(
        &self,
        product_type_id: &str,
        staged: &StagedProduct,
    ) -> Result<RowOutcome, ImportError> {
        match self.client.create_product(product_type_id, &staged.input).await {
            Ok(id) => Ok(RowOutcome::Created { id }),
            Err(e) if e.is_conflict() => {
                tracing::info!(sku = %staged.sku, "product already exists, updating");
                let id = self
                    .client
                    .get_product_by_sku(&staged.sku)
                    .await?
                    .ok_or_else(|| ImportError::ConflictWithoutMatch {
                        sku: staged.sku.clone(),
                    })?;
                let message = self.client.update_product(&id, &staged.input).await?;
                Ok(RowOutcome::Updated { message })
            }
            Err(e) => Err(e.into()),
        }
    }
}
