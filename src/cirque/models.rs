//! Data models for scraped products, variants, and the page-embedded records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a description fragment renders on the source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DescriptionPlacement {
    Main,
    Adjacent,
    Distant,
}

/// A named block of description HTML with its placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSection {
    /// Section heading (ABOUT, NOTES, DIRECTIONS)
    pub name: String,
    /// Raw HTML of the section
    pub content: String,
    /// Placement on the source page
    pub description_placement: DescriptionPlacement,
}

/// A selectable product configuration parsed from the variant dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Display label, e.g. "Gold" or "Silver (Out of stock)"
    pub variant: String,
    /// False when the label is marked out of stock
    pub availability: bool,
    /// Option value used to drive the select control
    pub value: String,
}

/// A normalized product record, one per page or one per variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog id, or `{catalogId}_{variantLabel}` in variant mode
    pub id: String,
    /// Product title
    pub title: String,
    /// Canonical product URL from the catalog record
    pub url: String,
    /// Storefront brand
    pub brand: String,
    /// Currency code from the storefront record
    pub currency: String,
    /// Current price; NaN when the source text does not parse
    pub real_price: f64,
    /// Non-sale price; NaN when the page shows none
    pub higher_price: f64,
    /// Purchasable flag from the storefront record
    pub availability: bool,
    /// Variant label; empty outside variant mode
    pub color: String,
    /// Breadcrumb trail, outermost first
    pub breadcrumbs: Vec<String>,
    /// Plain text of the MAIN description section
    pub description: String,
    /// Feature bullets, ingredient text, or `[description]` as fallback
    pub bullets: Vec<String>,
    /// Size text when the page states one
    pub size: Option<String>,
    /// Embedded video URLs
    pub videos: Vec<String>,
    /// Image URLs: page-derived first, override images appended
    pub images: Vec<String>,
    /// MAIN / ADJACENT / DISTANT description sections
    pub additional_sections: Vec<DescriptionSection>,
}

/// Input to the scrape pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Fully qualified product page URL
    pub page_url: String,
}

/// Output of one page visit.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    /// Full-page screenshot, PNG bytes
    pub screenshot: Vec<u8>,
    /// One product per variant, or a single product
    pub products: Vec<Product>,
}

/// The page-global catalog record (`window.item`).
///
/// The storefront emits `ProductID` and `Price` as either JSON numbers or
/// strings depending on the theme version, so both are kept opaque and read
/// through the accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "ProductID", default)]
    pub product_id: Value,
    #[serde(rename = "Price", default)]
    pub price: Value,
    #[serde(rename = "URL", default)]
    pub url: String,
}

impl CatalogRecord {
    /// Returns the catalog identifier as a string.
    pub fn id(&self) -> String {
        scalar_text(&self.product_id)
    }

    /// Returns the catalog price as text, ready for [`parse_price`].
    pub fn price_text(&self) -> String {
        scalar_text(&self.price)
    }
}

/// The page-global storefront record (`window.BCData`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontData {
    #[serde(default)]
    pub product_attributes: ProductAttributes,
}

/// Selection-state attributes nested inside the storefront record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(default)]
    pub purchasable: bool,
    #[serde(default)]
    pub price: AttributePricing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributePricing {
    #[serde(default)]
    pub without_tax: TaxAmount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxAmount {
    #[serde(default)]
    pub currency: String,
}

impl StorefrontData {
    /// Purchasable flag; false when the record omits it.
    pub fn purchasable(&self) -> bool {
        self.product_attributes.purchasable
    }

    /// Tax-exclusive currency code; empty when the record omits it.
    pub fn currency(&self) -> &str {
        &self.product_attributes.price.without_tax.currency
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parses a textual currency amount, yielding NaN when the text has no
/// usable number. Unparsable prices are recorded, not fatal.
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String =
        text.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',').collect();

    if cleaned.is_empty() {
        return f64::NAN;
    }

    cleaned.replace(',', "").parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("16.00"), 16.0);
        assert_eq!(parse_price("$16.00"), 16.0);
        assert_eq!(parse_price("1,299.50"), 1299.5);
        assert_eq!(parse_price("  14 "), 14.0);
    }

    #[test]
    fn test_parse_price_unparsable() {
        assert!(parse_price("").is_nan());
        assert!(parse_price("   ").is_nan());
        assert!(parse_price("N/A").is_nan());
        assert!(parse_price("..,").is_nan());
    }

    #[test]
    fn test_catalog_record_numeric_fields() {
        let catalog: CatalogRecord =
            serde_json::from_value(json!({"ProductID": 435, "Price": 16.0, "URL": "https://shop.example/georgette"}))
                .unwrap();
        assert_eq!(catalog.id(), "435");
        assert_eq!(catalog.price_text(), "16.0");
        assert_eq!(catalog.url, "https://shop.example/georgette");
    }

    #[test]
    fn test_catalog_record_string_fields() {
        let catalog: CatalogRecord =
            serde_json::from_value(json!({"ProductID": "335", "Price": "12.50"})).unwrap();
        assert_eq!(catalog.id(), "335");
        assert_eq!(catalog.price_text(), "12.50");
        assert_eq!(catalog.url, "");
    }

    #[test]
    fn test_catalog_record_missing_fields() {
        let catalog: CatalogRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(catalog.id(), "");
        assert!(parse_price(&catalog.price_text()).is_nan());
    }

    #[test]
    fn test_storefront_nested_read() {
        let storefront: StorefrontData = serde_json::from_value(json!({
            "product_attributes": {
                "purchasable": true,
                "price": { "without_tax": { "currency": "USD", "value": 16.0 } }
            }
        }))
        .unwrap();
        assert!(storefront.purchasable());
        assert_eq!(storefront.currency(), "USD");
    }

    #[test]
    fn test_storefront_defaults() {
        let storefront: StorefrontData = serde_json::from_value(json!({})).unwrap();
        assert!(!storefront.purchasable());
        assert_eq!(storefront.currency(), "");
    }

    #[test]
    fn test_placement_serde_names() {
        let json = serde_json::to_string(&DescriptionPlacement::Main).unwrap();
        assert_eq!(json, "\"MAIN\"");
        let parsed: DescriptionPlacement = serde_json::from_str("\"DISTANT\"").unwrap();
        assert_eq!(parsed, DescriptionPlacement::Distant);
    }

    fn make_test_product() -> Product {
        Product {
            id: "435_Gold".to_string(),
            title: "Georgette".to_string(),
            url: "https://shop.example/georgette".to_string(),
            brand: "Cirque Colors".to_string(),
            currency: "USD".to_string(),
            real_price: 14.0,
            higher_price: 18.0,
            availability: true,
            color: "Gold".to_string(),
            breadcrumbs: vec!["Home".to_string(), "Nail Polish".to_string()],
            description: "A sheer georgette crepe.".to_string(),
            bullets: vec!["10-Free".to_string()],
            size: Some("0.5 fl oz".to_string()),
            videos: Vec::new(),
            images: vec!["https://cdn.example/a.jpg".to_string()],
            additional_sections: vec![DescriptionSection {
                name: "ABOUT".to_string(),
                content: "<p>A sheer georgette crepe.</p>".to_string(),
                description_placement: DescriptionPlacement::Main,
            }],
        }
    }

    #[test]
    fn test_product_wire_names() {
        let product = make_test_product();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"realPrice\":14.0"));
        assert!(json.contains("\"higherPrice\":18.0"));
        assert!(json.contains("\"additionalSections\""));
        assert!(json.contains("\"description_placement\":\"MAIN\""));
    }

    #[test]
    fn test_product_nan_price_serializes_as_null() {
        let mut product = make_test_product();
        product.higher_price = f64::NAN;
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"higherPrice\":null"));
    }

    #[test]
    fn test_product_serde_roundtrip() {
        let product = make_test_product();
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, product.id);
        assert_eq!(parsed.color, "Gold");
        assert_eq!(parsed.real_price, 14.0);
        assert_eq!(parsed.higher_price, 18.0);
        assert_eq!(parsed.additional_sections, product.additional_sections);
    }

    #[test]
    fn test_variant_serde() {
        let variant = Variant {
            variant: "Silver (Out of stock)".to_string(),
            availability: false,
            value: "13".to_string(),
        };
        let json = serde_json::to_string(&variant).unwrap();
        let parsed: Variant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, variant);
    }
}
