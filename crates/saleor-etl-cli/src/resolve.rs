//! Lookup-or-create of the two-level category a product is filed under.

use saleor_etl_client::CatalogClient;
use saleor_etl_core::CategoryPath;

use crate::import::ImportError;

/// Resolves a category cell such as `"Auto/Brakes/Pads"` to the catalog id of
/// its leaf (`Pads`), creating `Brakes` and/or `Pads` when they do not exist.
///
/// Categories are matched by exact name only. The child lookup is not scoped
/// to the parent, so a `Pads` category under another parent is reused.
///
/// # Errors
///
/// - [`ImportError::CategoryPath`] if the cell has fewer than two segments.
/// - [`ImportError::Catalog`] if a lookup fails or a creation is rejected.
pub(crate) async fn resolve_category(
    client: &CatalogClient,
    raw_path: &str,
) -> Result<String, ImportError> {
    let path = CategoryPath::parse(raw_path)?;

    let Some(parent_id) = client.get_category_by_name(&path.parent).await? else {
        tracing::info!(category = %path.parent, "creating parent category");
        let parent_id = client.create_category(&path.parent, None).await?;
        tracing::info!(category = %path.child, parent = %path.parent, "creating category");
        return Ok(client.create_category(&path.child, Some(&parent_id)).await?);
    };

    if let Some(child_id) = client.get_category_by_name(&path.child).await? {
        return Ok(child_id);
    }

    tracing::info!(category = %path.child, parent = %path.parent, "creating category");
    Ok(client.create_category(&path.child, Some(&parent_id)).await?)
}
