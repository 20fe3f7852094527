//! Product assembly: a pure merge of extractor outputs into one record.

use crate::cirque::extract;
use crate::cirque::models::{
    parse_price, CatalogRecord, DescriptionPlacement, DescriptionSection, Product, StorefrontData,
};
use crate::text::html_to_text;
use scraper::Html;

/// Storefront brand stamped on every record.
pub const BRAND: &str = "Cirque Colors";

/// Page-level fields gathered from the initial DOM snapshot. Shared
/// unchanged by every product the page expands into.
#[derive(Debug, Clone)]
pub struct PageFields {
    pub title: String,
    pub breadcrumbs: Vec<String>,
    pub bullets: Vec<String>,
    pub sizes: Vec<String>,
    pub videos: Vec<String>,
    pub additional_sections: Vec<DescriptionSection>,
    pub higher_price_text: String,
}

impl PageFields {
    /// Runs every page-scoped extractor against one snapshot.
    pub fn from_document(doc: &Html, catalog_id: &str) -> Self {
        Self {
            title: extract::title(doc),
            breadcrumbs: extract::breadcrumbs(doc),
            bullets: extract::bullets(doc),
            sizes: extract::sizes(doc),
            videos: extract::videos(doc),
            additional_sections: extract::additional_sections(doc, catalog_id),
            higher_price_text: extract::higher_price_text(doc),
        }
    }
}

/// Builds one product from the page fields and the two embedded records.
///
/// With a variant label the id becomes `{catalogId}_{label}` and `color`
/// carries the label; without one the id is the bare catalog id. Images
/// are left empty for the caller to fill (gallery or per-variant).
pub fn build_product(
    fields: &PageFields,
    catalog: &CatalogRecord,
    storefront: &StorefrontData,
    variant_label: Option<&str>,
) -> Product {
    let catalog_id = catalog.id();
    let (id, color) = match variant_label {
        Some(label) => (format!("{}_{}", catalog_id, label), label.to_string()),
        None => (catalog_id, String::new()),
    };

    let description = fields
        .additional_sections
        .iter()
        .find(|section| section.description_placement == DescriptionPlacement::Main)
        .map(|section| html_to_text(&section.content))
        .unwrap_or_default();

    // Pages without any bullet source still get one bullet: the description
    let bullets = if fields.bullets.is_empty() {
        vec![description.clone()]
    } else {
        fields.bullets.clone()
    };

    Product {
        id,
        title: fields.title.clone(),
        url: catalog.url.clone(),
        brand: BRAND.to_string(),
        currency: storefront.currency().to_string(),
        real_price: parse_price(&catalog.price_text()),
        higher_price: parse_price(&fields.higher_price_text),
        availability: storefront.purchasable(),
        color,
        breadcrumbs: fields.breadcrumbs.clone(),
        description,
        bullets,
        size: fields.sizes.first().cloned(),
        videos: fields.videos.clone(),
        images: Vec::new(),
        additional_sections: fields.additional_sections.clone(),
    }
}
