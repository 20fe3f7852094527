//! CSS selectors for the Cirque Colors product page.
//!
//! This file contains all CSS selectors used by the extraction pipeline.
//! Update this file when the storefront theme changes its HTML structure.
//!
//! The theme is a stock BigCommerce layout; the long absolute paths below
//! are the ones the live page actually requires to pin down the active
//! gallery slide and the selection-state price.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for static product-detail content.
pub mod detail {
    use super::*;

    /// Product title heading.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".productView-title").unwrap());

    /// Breadcrumb trail entries.
    pub static BREADCRUMBS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".breadcrumbs.breadcrumb-container li").unwrap());

    /// Checkmarked feature headings in the details column.
    pub static BULLET_HEADINGS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product_details_column h5").unwrap());

    /// Generic list items in the details column.
    pub static BULLET_ITEMS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product_details_column ul li").unwrap());

    /// Free-form paragraphs in the details column (ingredients, size).
    pub static DETAIL_PARAGRAPHS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product_details_column p").unwrap());

    /// Links inside a detail paragraph; their presence demotes an
    /// ingredients statement to a pointer rather than inline content.
    pub static PARAGRAPH_LINKS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href]").unwrap());

    /// Labels of the info rows (used for the KINDLY NOTE lookup).
    pub static INFO_NAMES: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".productView-info-name").unwrap());

    /// Description content blocks, narrow form.
    pub static INFO_VALUES_NARROW: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(".productView-info div.productView-info-value .productView-info-value")
            .unwrap()
    });

    /// Description content blocks, broad fallback when the narrow form
    /// matches nothing.
    pub static INFO_VALUES_BROAD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".productView-info div.productView-info-value").unwrap());

    /// Directions paragraph inside the description tab.
    pub static DISTANT_DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#tab-description > div > div:nth-child(2) > p").unwrap());

    /// Embedded video frames inside the description tab.
    pub static VIDEO_IFRAMES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("#tab-description > div > div:nth-child(1) > p > iframe").unwrap()
    });

    /// Gallery thumbnail anchors.
    pub static THUMBNAILS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".productView-thumbnail-link").unwrap());

    /// Zoom-image attribute on a thumbnail anchor.
    pub static ZOOM_IMAGE_ATTR: &str = "data-image-gallery-zoom-image-url";

    /// Non-sale ("was") price.
    pub static HIGHER_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".price.price--non-sale").unwrap());
}

/// Selectors for the variant dropdown and selection-dependent state.
pub mod variant {
    use super::*;

    /// Variant label node; its presence marks a variant product.
    pub static LABEL: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(".form-label.form-label--alternate.form-label--inlineSmall").unwrap()
    });

    /// Options of the variant dropdown.
    pub static OPTIONS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".form-select.form-select--small > option").unwrap());

    /// The dropdown itself, as raw CSS for page-level wait/select calls.
    pub static SELECT_CSS: &str = ".form-select.form-select--small";

    /// Image of the currently active gallery slide after a selection.
    pub static ACTIVE_SLIDE_IMAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "body > div.body > div.container > div > \
             div.productView.product-images-data.product-primary > \
             section.productView-images > figure > div > div > div > \
             a.slick-slide.slick-current.slick-active > img",
        )
        .unwrap()
    });

    /// Tax-exclusive price shown for the current selection state.
    pub static DISPLAYED_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "body > div.body > div.container > div > \
             div.productView.product-images-data.product-primary > \
             section.productView-details.product-options > \
             div.productView-product > div.productView-price > \
             div:nth-child(3) > span.price.price--withoutTax",
        )
        .unwrap()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*detail::TITLE;
        let _ = &*detail::BREADCRUMBS;
        let _ = &*detail::BULLET_HEADINGS;
        let _ = &*detail::BULLET_ITEMS;
        let _ = &*detail::DETAIL_PARAGRAPHS;
        let _ = &*detail::PARAGRAPH_LINKS;
        let _ = &*detail::INFO_NAMES;
        let _ = &*detail::INFO_VALUES_NARROW;
        let _ = &*detail::INFO_VALUES_BROAD;
        let _ = &*detail::DISTANT_DESCRIPTION;
        let _ = &*detail::VIDEO_IFRAMES;
        let _ = &*detail::THUMBNAILS;
        let _ = &*detail::HIGHER_PRICE;
        let _ = &*variant::LABEL;
        let _ = &*variant::OPTIONS;
        let _ = &*variant::ACTIVE_SLIDE_IMAGE;
        let _ = &*variant::DISPLAYED_PRICE;
    }

    #[test]
    fn test_basic_selector_matching() {
        let html = Html::parse_document(
            r#"<h1 class="productView-title">Georgette</h1>
               <a class="productView-thumbnail-link"
                  data-image-gallery-zoom-image-url="https://cdn.example/a.jpg"></a>"#,
        );

        let title: Vec<_> = html.select(&detail::TITLE).collect();
        assert_eq!(title.len(), 1);

        let thumb = html.select(&detail::THUMBNAILS).next().unwrap();
        assert_eq!(
            thumb.value().attr(detail::ZOOM_IMAGE_ATTR),
            Some("https://cdn.example/a.jpg")
        );
    }
}
