//! Mapping from sheet rows to the catalog's product input shape.
//!
//! Publication and tax flags are fixed policy for imported products:
//! everything is published, taxed, and untracked in inventory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{ImportRow, Weight};

/// Payload for `productCreate` / `productUpdate`.
///
/// Fields that may be absent on a product fetched back from the catalog are
/// optional; [`map_row`] always fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub charge_taxes: bool,
    pub is_published: bool,
    pub track_inventory: bool,
    /// Catalog id of the leaf category.
    pub category: Option<String>,
    pub base_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    pub seo: Option<SeoInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Builds the create/update payload for a row whose category has been
/// resolved to `category_id`.
#[must_use]
pub fn map_row(row: &ImportRow, category_id: &str) -> ProductInput {
    ProductInput {
        name: row.name.clone(),
        sku: Some(row.sku.clone()),
        charge_taxes: true,
        is_published: true,
        track_inventory: false,
        category: Some(category_id.to_string()),
        base_price: Some(row.price),
        weight: row.weight.clone(),
        seo: Some(SeoInput {
            title: Some(row.seo_title.clone()),
            description: Some(row.seo_description.clone()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brake_pad_row() -> ImportRow {
        ImportRow {
            row: 2,
            name: "Brake Pad".to_string(),
            sku: "BP-100".to_string(),
            price: Decimal::new(2999, 2),
            weight: None,
            category_path: "Auto/Brakes/Pads".to_string(),
            seo_title: "Brake Pad SEO".to_string(),
            seo_description: "desc".to_string(),
        }
    }

    #[test]
    fn map_row_carries_row_fields_and_category() {
        let input = map_row(&brake_pad_row(), "Q2F0ZWdvcnk6NDI=");

        assert_eq!(input.name, "Brake Pad");
        assert_eq!(input.sku.as_deref(), Some("BP-100"));
        assert_eq!(input.base_price, Some(Decimal::new(2999, 2)));
        assert_eq!(input.category.as_deref(), Some("Q2F0ZWdvcnk6NDI="));
        assert!(!input.track_inventory);
        assert!(input.charge_taxes);
        assert!(input.is_published);
        assert_eq!(
            input.seo,
            Some(SeoInput {
                title: Some("Brake Pad SEO".to_string()),
                description: Some("desc".to_string()),
            })
        );
    }

    #[test]
    fn map_row_keeps_weight_when_present() {
        let mut row = brake_pad_row();
        row.weight = Some(Weight {
            unit: "LB".to_string(),
            value: 1.25,
        });
        let input = map_row(&row, "cat");
        assert_eq!(input.weight.map(|w| w.value), Some(1.25));
    }

    #[test]
    fn serialized_payload_uses_catalog_field_names() {
        let json = serde_json::to_value(map_row(&brake_pad_row(), "cat-1")).unwrap();

        assert_eq!(json["name"], "Brake Pad");
        assert_eq!(json["sku"], "BP-100");
        assert_eq!(json["chargeTaxes"], true);
        assert_eq!(json["isPublished"], true);
        assert_eq!(json["trackInventory"], false);
        assert_eq!(json["category"], "cat-1");
        assert_eq!(json["basePrice"], "29.99");
        assert_eq!(json["seo"]["title"], "Brake Pad SEO");
        assert!(json.get("weight").is_none(), "absent weight must be omitted");
    }
}
