//! The extraction pipeline: orchestration and variant expansion.

use crate::cirque::assemble::{build_product, PageFields};
use crate::cirque::extract;
use crate::cirque::models::{
    parse_price, CatalogRecord, Product, ScrapeRequest, ScrapeResult, StorefrontData, Variant,
};
use crate::cirque::overrides;
use crate::cirque::selectors::variant::SELECT_CSS;
use crate::config::Config;
use crate::page::ProductPage;
use anyhow::{Context, Result};
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Page global holding the catalog record.
const CATALOG_GLOBAL: &str = "item";

/// Page global holding the storefront record.
const STOREFRONT_GLOBAL: &str = "BCData";

/// Runs the extraction-and-assembly pipeline against one rendered page.
pub struct ProductScraper {
    globals_timeout: Duration,
    selector_timeout: Duration,
    settle_delay: Duration,
}

impl Default for ProductScraper {
    fn default() -> Self {
        Self {
            globals_timeout: Duration::from_secs(10),
            selector_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_millis(500),
        }
    }
}

impl ProductScraper {
    /// Creates a scraper with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scraper with timing taken from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            globals_timeout: config.globals_timeout(),
            selector_timeout: config.selector_timeout(),
            settle_delay: config.settle_delay(),
        }
    }

    /// Visits the product page and returns its products plus a screenshot.
    ///
    /// A page that exposes a variant dropdown yields one product per valid
    /// variant; any other page yields a single product carrying the full
    /// image gallery. Failures inside the variant loop abort the loop but
    /// keep the products already built; a missing catalog or storefront
    /// global is fatal for the whole visit.
    pub async fn scrape<P: ProductPage>(
        &self,
        page: &P,
        request: &ScrapeRequest,
    ) -> Result<ScrapeResult> {
        page.goto(&request.page_url).await?;

        debug!("waiting for catalog and storefront globals");
        let catalog: CatalogRecord =
            serde_json::from_value(page.wait_for_global(CATALOG_GLOBAL, self.globals_timeout).await?)
                .context("malformed catalog record in window.item")?;
        let storefront: StorefrontData =
            serde_json::from_value(page.wait_for_global(STOREFRONT_GLOBAL, self.globals_timeout).await?)
                .context("malformed storefront record in window.BCData")?;

        let catalog_id = catalog.id();
        let html = page.content().await?;
        let (fields, is_variant_page, variants, gallery) = {
            let doc = Html::parse_document(&html);
            (
                PageFields::from_document(&doc, &catalog_id),
                extract::has_variant_selector(&doc),
                extract::variants(&doc),
                extract::gallery_images(&doc),
            )
        };

        let mut products: Vec<Product> = Vec::new();

        if is_variant_page {
            debug!(count = variants.len(), "variant dropdown found, expanding");
            for variant in &variants {
                match self.scrape_variant(page, &fields, &catalog, &storefront, variant).await {
                    Ok(product) => products.push(product),
                    Err(e) => {
                        warn!(
                            "variant '{}' failed, keeping {} product(s) already built: {:#}",
                            variant.variant,
                            products.len(),
                            e
                        );
                        break;
                    }
                }
            }
        } else {
            let mut product = build_product(&fields, &catalog, &storefront, None);
            product.images = gallery;
            products.push(product);
        }

        let screenshot = page.screenshot().await?;
        info!(products = products.len(), "scraped {}", request.page_url);

        Ok(ScrapeResult { screenshot, products })
    }

    /// Builds one product for a declared variant.
    ///
    /// Available variants are actually selected on the page; after the
    /// settle delay the active gallery slide becomes the variant's sole
    /// page-derived image. Unavailable variants cannot be selected and get
    /// none. Either way the displayed price reflects the current selection
    /// state and overwrites the catalog price, and image overrides keyed by
    /// the composite id are appended last.
    async fn scrape_variant<P: ProductPage>(
        &self,
        page: &P,
        fields: &PageFields,
        catalog: &CatalogRecord,
        storefront: &StorefrontData,
        variant: &Variant,
    ) -> Result<Product> {
        let mut product = build_product(fields, catalog, storefront, Some(&variant.variant));

        if variant.availability {
            page.wait_for_selector(SELECT_CSS, self.selector_timeout).await?;
            page.select_option(SELECT_CSS, &variant.value).await?;
            page.settle(self.settle_delay).await;

            let html = page.content().await?;
            let main_image = {
                let doc = Html::parse_document(&html);
                extract::active_slide_image(&doc)
            };
            let main_image = main_image.with_context(|| {
                format!("no active gallery slide after selecting '{}'", variant.variant)
            })?;
            product.images.push(main_image);
        }

        let html = page.content().await?;
        let price_text = {
            let doc = Html::parse_document(&html);
            extract::displayed_price_text(&doc)
        };
        let price_text = price_text.context("displayed price element not found")?;
        product.real_price = parse_price(&price_text);

        if let Some(urls) = overrides::image_overrides(&product.id) {
            product.images.extend(urls.iter().map(|url| url.to_string()));
        }

        Ok(product)
    }
}
