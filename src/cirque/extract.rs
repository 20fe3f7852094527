//! Field extractors for the rendered product page.
//!
//! Every extractor is a pure read over one parsed DOM snapshot and returns
//! a best-effort value: a missing node yields an empty default, never an
//! error. The orchestrator decides which snapshot each extractor sees;
//! selection-dependent reads ([`active_slide_image`], [`displayed_price_text`])
//! are run against a fresh snapshot taken after the variant was applied.

use crate::cirque::models::{DescriptionPlacement, DescriptionSection, Variant};
use crate::cirque::overrides;
use crate::cirque::selectors::{detail, variant};
use scraper::{ElementRef, Html};

/// Fixed ingredient list substituted when the page only links to it.
const INGREDIENTS_FULL_LIST: &str =
    "Butyl Acetate, Ethyl Acetate, Nitrocellulose, Adipic Acid / Neopentyl Glycol / \
     Trimellitic Anhydride Copolymer, Acetyl Tributyl Citrate, Isopropyl Alcohol, \
     Acrylates Copolymer, Stearalkonium Bentonite, N-Butyl Alcohol, Styrene / Acrylates \
     Copolymer, Benzophenone-1, Silica, Alumina, Trimethylpentanediyl Dibenzoate";

/// Fixed may-contain colorant list paired with the full ingredient list.
const INGREDIENTS_MAY_CONTAIN: &str =
    "Aluminum Powder (CI 77000), Bismuth Oxychloride (CI 77163), Ferric Ferrocyanide \
     (CI 77510), Iron Oxides (CI 77489, CI 77491, CI 77492, CI 77499), Mica (CI 77019), \
     Polyethylene Terephthalate, Red 6 (CI 15850), Red 7 (CI 15850), Red 30 (CI 73360), \
     Red 34 (CI 15880), Tin Oxide (CI 77861), Titanium Dioxide (CI 77891), Ultramarines \
     (CI 77007), Violet 2 (CI 60725), Yellow 5 (CI 19140), Yellow 10 (CI 47005)";

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Product title; empty when the heading is absent.
pub fn title(doc: &Html) -> String {
    doc.select(&detail::TITLE).next().map(|e| text_of(e).trim().to_string()).unwrap_or_default()
}

/// Breadcrumb trail in DOM order, trimmed, empty entries dropped.
pub fn breadcrumbs(doc: &Html) -> Vec<String> {
    doc.select(&detail::BREADCRUMBS)
        .map(|e| text_of(e).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Feature bullets collected from four locations in fixed append order:
/// checkmarked headings, generic list items, the ingredients disclosure,
/// and the KINDLY NOTE info label. Matches are appended, never deduplicated.
pub fn bullets(doc: &Html) -> Vec<String> {
    let mut bullets = Vec::new();

    for heading in doc.select(&detail::BULLET_HEADINGS) {
        let text = text_of(heading);
        if text.contains('✔') {
            bullets.push(text.replace('✔', "").trim().to_string());
        }
    }

    for item in doc.select(&detail::BULLET_ITEMS) {
        let text = text_of(item).trim().to_string();
        if !text.is_empty() {
            bullets.push(text);
        }
    }

    for paragraph in doc.select(&detail::DETAIL_PARAGRAPHS) {
        let text = text_of(paragraph);
        if text.contains("Ingredients: View full list") {
            bullets.push(INGREDIENTS_FULL_LIST.to_string());
            bullets.push(INGREDIENTS_MAY_CONTAIN.to_string());
        } else if text.contains("Ingredients: ")
            && paragraph.select(&detail::PARAGRAPH_LINKS).next().is_none()
        {
            // Inline ingredients statement, no link to a fuller list
            bullets.push(text.trim().to_string());
        }
    }

    if let Some(note) =
        doc.select(&detail::INFO_NAMES).find(|e| text_of(*e).contains("KINDLY NOTE"))
    {
        bullets.push(text_of(note).trim().to_string());
    }

    bullets
}

/// Size statements: detail paragraphs containing `Size:` with the token
/// stripped and `" and"` rewritten as a comma. Normally zero or one match.
pub fn sizes(doc: &Html) -> Vec<String> {
    doc.select(&detail::DETAIL_PARAGRAPHS)
        .filter_map(|paragraph| {
            let text = text_of(paragraph);
            if !text.contains("Size:") {
                return None;
            }
            let stripped = text.replace("Size:", " ");
            Some(stripped.trim().replace(" and", ",").trim().to_string())
        })
        .collect()
}

/// Embedded video URLs from the description tab.
pub fn videos(doc: &Html) -> Vec<String> {
    doc.select(&detail::VIDEO_IFRAMES)
        .filter_map(|frame| frame.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(String::from)
        .collect()
}

/// Full gallery: every thumbnail's zoom-image URL, DOM order, each unique
/// URL exactly once.
pub fn gallery_images(doc: &Html) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    for thumbnail in doc.select(&detail::THUMBNAILS) {
        if let Some(url) = thumbnail.value().attr(detail::ZOOM_IMAGE_ATTR) {
            if !url.is_empty() && !images.iter().any(|seen| seen == url) {
                images.push(url.to_string());
            }
        }
    }
    images
}

/// True when the page carries a variant dropdown. Absence of the label
/// node, for any reason, means "not a variant product".
pub fn has_variant_selector(doc: &Html) -> bool {
    doc.select(&variant::LABEL).next().is_some()
}

/// Declared variants in dropdown order. Options without a `value`
/// attribute are placeholders and are discarded.
pub fn variants(doc: &Html) -> Vec<Variant> {
    doc.select(&variant::OPTIONS)
        .filter_map(|option| {
            let value = option.value().attr("value").unwrap_or_default();
            if value.is_empty() {
                return None;
            }
            Some(Variant {
                variant: text_of(option).trim().to_string(),
                availability: !option.inner_html().contains("Out of stock"),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Description sections: MAIN is the first content block (narrow selector,
/// broad fallback), ADJACENT the second block of the same set when present,
/// DISTANT the directions node or, failing that, the directions override
/// for this catalog id.
pub fn additional_sections(doc: &Html, catalog_id: &str) -> Vec<DescriptionSection> {
    let mut blocks: Vec<ElementRef> = doc.select(&detail::INFO_VALUES_NARROW).collect();
    if blocks.is_empty() {
        blocks = doc.select(&detail::INFO_VALUES_BROAD).collect();
    }

    let mut sections = Vec::new();

    if let Some(first) = blocks.first() {
        sections.push(DescriptionSection {
            name: "ABOUT".to_string(),
            content: first.html().trim().to_string(),
            description_placement: DescriptionPlacement::Main,
        });
    }

    if let Some(second) = blocks.get(1) {
        sections.push(DescriptionSection {
            name: "NOTES".to_string(),
            content: second.html().trim().to_string(),
            description_placement: DescriptionPlacement::Adjacent,
        });
    }

    let distant = doc
        .select(&detail::DISTANT_DESCRIPTION)
        .next()
        .map(|node| node.html().trim().to_string())
        .or_else(|| overrides::directions_override(catalog_id).map(String::from));

    if let Some(content) = distant {
        sections.push(DescriptionSection {
            name: "DIRECTIONS".to_string(),
            content,
            description_placement: DescriptionPlacement::Distant,
        });
    }

    sections
}

/// Non-sale price text with the currency symbol stripped; empty when the
/// page shows no non-sale price (parses to NaN downstream).
pub fn higher_price_text(doc: &Html) -> String {
    doc.select(&detail::HIGHER_PRICE)
        .next()
        .map(|e| text_of(e).trim().replace('$', ""))
        .unwrap_or_default()
}

/// URL of the image in the currently active gallery slide.
pub fn active_slide_image(doc: &Html) -> Option<String> {
    doc.select(&variant::ACTIVE_SLIDE_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(String::from)
}

/// Price text shown for the current selection state, currency symbol
/// stripped. The page renders this even for unavailable variants.
pub fn displayed_price_text(doc: &Html) -> Option<String> {
    doc.select(&variant::DISPLAYED_PRICE).next().map(|e| text_of(e).trim().replace('$', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_title() {
        let html = doc(r#"<h1 class="productView-title"> Georgette </h1>"#);
        assert_eq!(title(&html), "Georgette");
    }

    #[test]
    fn test_title_absent() {
        let html = doc("<h1>Not the product title</h1>");
        assert_eq!(title(&html), "");
    }

    #[test]
    fn test_breadcrumbs() {
        let html = doc(
            r#"<ul class="breadcrumbs breadcrumb-container">
                 <li> Home </li><li></li><li>Nail Polish</li>
               </ul>"#,
        );
        assert_eq!(breadcrumbs(&html), vec!["Home", "Nail Polish"]);
    }

    #[test]
    fn test_bullets_checkmark_headings() {
        let html = doc(
            r#"<div class="product_details_column">
                 <h5>✔ 10-Free</h5>
                 <h5>Plain heading</h5>
                 <h5>✔ Vegan &amp; Cruelty-Free</h5>
               </div>"#,
        );
        assert_eq!(bullets(&html), vec!["10-Free", "Vegan & Cruelty-Free"]);
    }

    #[test]
    fn test_bullets_append_order() {
        let html = doc(
            r#"<div class="product_details_column">
                 <ul><li>Quick-dry formula</li></ul>
                 <h5>✔ 10-Free</h5>
               </div>
               <div class="productView-info-name">KINDLY NOTE: shades may vary</div>"#,
        );
        // Headings first, then list items, then the note
        assert_eq!(
            bullets(&html),
            vec!["10-Free", "Quick-dry formula", "KINDLY NOTE: shades may vary"]
        );
    }

    #[test]
    fn test_bullets_ingredients_link_triggers_literals() {
        let html = doc(
            r#"<div class="product_details_column">
                 <p>Ingredients: View full list <a href="/ingredients">here</a></p>
               </div>"#,
        );
        let collected = bullets(&html);
        assert_eq!(collected.len(), 2);
        assert!(collected[0].starts_with("Butyl Acetate"));
        assert!(collected[1].starts_with("Aluminum Powder"));
    }

    #[test]
    fn test_bullets_inline_ingredients_without_link() {
        let html = doc(
            r#"<div class="product_details_column">
                 <p>Ingredients: Water, Glycerin</p>
               </div>"#,
        );
        assert_eq!(bullets(&html), vec!["Ingredients: Water, Glycerin"]);
    }

    #[test]
    fn test_bullets_linked_ingredients_not_inlined() {
        let html = doc(
            r#"<div class="product_details_column">
                 <p>Ingredients: <a href="/full">see the label</a></p>
               </div>"#,
        );
        assert!(bullets(&html).is_empty());
    }

    #[test]
    fn test_sizes() {
        let html = doc(
            r#"<div class="product_details_column">
                 <p>Size: 0.5 fl oz and 0.25 fl oz</p>
               </div>"#,
        );
        assert_eq!(sizes(&html), vec!["0.5 fl oz, 0.25 fl oz"]);
    }

    #[test]
    fn test_sizes_absent() {
        let html = doc(r#"<div class="product_details_column"><p>No dimensions here</p></div>"#);
        assert!(sizes(&html).is_empty());
    }

    #[test]
    fn test_videos() {
        let html = doc(
            r#"<div id="tab-description"><div>
                 <div><p>
                   <iframe src="https://www.youtube.com/embed/abc123"></iframe>
                   <iframe></iframe>
                 </p></div>
                 <div><p>Directions text.</p></div>
               </div></div>"#,
        );
        assert_eq!(videos(&html), vec!["https://www.youtube.com/embed/abc123"]);
    }

    #[test]
    fn test_gallery_images_dedup_in_dom_order() {
        let html = doc(
            r#"<a class="productView-thumbnail-link" data-image-gallery-zoom-image-url="https://cdn.example/a.jpg"></a>
               <a class="productView-thumbnail-link" data-image-gallery-zoom-image-url="https://cdn.example/b.jpg"></a>
               <a class="productView-thumbnail-link" data-image-gallery-zoom-image-url="https://cdn.example/a.jpg"></a>
               <a class="productView-thumbnail-link"></a>"#,
        );
        assert_eq!(
            gallery_images(&html),
            vec!["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]
        );
    }

    #[test]
    fn test_variant_probe() {
        let with = doc(
            r#"<label class="form-label form-label--alternate form-label--inlineSmall">Color</label>"#,
        );
        assert!(has_variant_selector(&with));

        let without = doc(r#"<label class="form-label">Quantity</label>"#);
        assert!(!has_variant_selector(&without));
    }

    #[test]
    fn test_variants_skip_valueless_options() {
        let html = doc(
            r#"<select class="form-select form-select--small">
                 <option value="">Choose a color</option>
                 <option value="12">Gold</option>
                 <option value="13">Silver (Out of stock)</option>
               </select>"#,
        );
        let parsed = variants(&html);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], Variant {
            variant: "Gold".to_string(),
            availability: true,
            value: "12".to_string(),
        });
        assert_eq!(parsed[1], Variant {
            variant: "Silver (Out of stock)".to_string(),
            availability: false,
            value: "13".to_string(),
        });
    }

    #[test]
    fn test_sections_narrow_selector_single_block() {
        let html = doc(
            r#"<div class="productView-info">
                 <div class="productView-info-value">
                   <div class="productView-info-value"><p>A rich cream polish.</p></div>
                 </div>
               </div>"#,
        );
        let sections = additional_sections(&html, "310");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "ABOUT");
        assert_eq!(sections[0].description_placement, DescriptionPlacement::Main);
        assert!(sections[0].content.contains("A rich cream polish."));
    }

    #[test]
    fn test_sections_adjacent_from_second_block() {
        let html = doc(
            r#"<div class="productView-info">
                 <div class="productView-info-value">
                   <div class="productView-info-value"><p>About text.</p></div>
                   <div class="productView-info-value"><p>Notes text.</p></div>
                 </div>
               </div>"#,
        );
        let sections = additional_sections(&html, "310");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].name, "NOTES");
        assert_eq!(sections[1].description_placement, DescriptionPlacement::Adjacent);
    }

    #[test]
    fn test_sections_broad_fallback() {
        let html = doc(
            r#"<div class="productView-info">
                 <div class="productView-info-value"><p>Only the broad form matches.</p></div>
               </div>"#,
        );
        let sections = additional_sections(&html, "310");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].description_placement, DescriptionPlacement::Main);
        assert!(sections[0].content.contains("Only the broad form"));
    }

    #[test]
    fn test_sections_distant_from_dom() {
        let html = doc(
            r#"<div id="tab-description"><div>
                 <div><p>Video paragraph.</p></div>
                 <div><p>Apply two coats.</p></div>
               </div></div>"#,
        );
        let sections = additional_sections(&html, "310");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "DIRECTIONS");
        assert_eq!(sections[0].description_placement, DescriptionPlacement::Distant);
        assert_eq!(sections[0].content, "<p>Apply two coats.</p>");
    }

    #[test]
    fn test_sections_distant_from_override() {
        let html = doc("<div></div>");
        let sections = additional_sections(&html, "335");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].description_placement, DescriptionPlacement::Distant);
        assert!(sections[0].content.contains("dip brush in acetone"));
    }

    #[test]
    fn test_sections_no_distant_without_override() {
        let html = doc("<div></div>");
        assert!(additional_sections(&html, "310").is_empty());
    }

    #[test]
    fn test_higher_price_text() {
        let html = doc(r#"<span class="price price--non-sale">$18.00</span>"#);
        assert_eq!(higher_price_text(&html), "18.00");

        let empty = doc("<div></div>");
        assert_eq!(higher_price_text(&empty), "");
    }

    fn product_view(inner: &str) -> Html {
        doc(&format!(
            r#"<div class="body"><div class="container"><div>
                 <div class="productView product-images-data product-primary">{}</div>
               </div></div></div>"#,
            inner
        ))
    }

    #[test]
    fn test_active_slide_image() {
        let html = product_view(
            r##"<section class="productView-images"><figure><div><div><div>
                 <a class="slick-slide" href="#"><img src="https://cdn.example/stale.jpg"></a>
                 <a class="slick-slide slick-current slick-active" href="#">
                   <img src="https://cdn.example/gold.jpg">
                 </a>
               </div></div></div></figure></section>"##,
        );
        assert_eq!(active_slide_image(&html), Some("https://cdn.example/gold.jpg".to_string()));
    }

    #[test]
    fn test_active_slide_image_absent() {
        let html = product_view(r#"<section class="productView-images"></section>"#);
        assert_eq!(active_slide_image(&html), None);
    }

    #[test]
    fn test_displayed_price_text() {
        let html = product_view(
            r#"<section class="productView-details product-options">
                 <div class="productView-product"><div class="productView-price">
                   <div>rrp</div>
                   <div>sale</div>
                   <div><span class="price price--withoutTax">$14.00</span></div>
                 </div></div>
               </section>"#,
        );
        assert_eq!(displayed_price_text(&html), Some("14.00".to_string()));
    }

    #[test]
    fn test_displayed_price_text_absent() {
        let html = product_view(r#"<section class="productView-details product-options"></section>"#);
        assert_eq!(displayed_price_text(&html), None);
    }
}
