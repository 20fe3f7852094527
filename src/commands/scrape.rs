//! Scrape command implementation.

use crate::browser::BrowserHandle;
use crate::cirque::models::{ScrapeRequest, ScrapeResult};
use crate::cirque::scraper::ProductScraper;
use crate::config::Config;
use crate::format::Formatter;
use crate::page::ProductPage;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Executes product-page scrapes for one or more URLs.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes every URL with a shared browser and returns formatted output.
    ///
    /// A URL that fails is reported and skipped; the remaining URLs still
    /// run. Screenshots are written when a screenshot directory is
    /// configured.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let browser =
            BrowserHandle::launch(&self.config).await.context("Failed to launch browser")?;

        let mut products = Vec::new();

        for url in urls {
            let page = match browser.new_page().await {
                Ok(page) => page,
                Err(e) => {
                    eprintln!("Failed to open page for {}: {:#}", url, e);
                    continue;
                }
            };

            match self.execute_with_page(&page, url).await {
                Ok(result) => {
                    if let Err(e) = self.persist_screenshot(url, &result.screenshot) {
                        eprintln!("Failed to write screenshot for {}: {:#}", url, e);
                    }
                    products.extend(result.products);
                }
                Err(e) => eprintln!("Failed to scrape {}: {:#}", url, e),
            }
        }

        browser.close().await.context("Failed to shut down browser")?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }

    /// Runs the pipeline against a provided page (for testing).
    pub async fn execute_with_page(
        &self,
        page: &impl ProductPage,
        url: &str,
    ) -> Result<ScrapeResult> {
        info!("Scraping product page: {}", url);

        let scraper = ProductScraper::from_config(&self.config);
        scraper.scrape(page, &ScrapeRequest { page_url: url.to_string() }).await
    }

    /// Writes the screenshot under the configured directory, named after
    /// the URL. Returns the path, or None when persistence is disabled.
    fn persist_screenshot(&self, url: &str, screenshot: &[u8]) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.config.screenshot_dir else {
            return Ok(None);
        };

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create screenshot dir: {}", dir.display()))?;

        let path = dir.join(format!("{}.png", url_slug(url)));
        std::fs::write(&path, screenshot)
            .with_context(|| format!("Failed to write screenshot: {}", path.display()))?;

        info!("Screenshot written to {}", path.display());
        Ok(Some(path))
    }
}

/// Reduces a URL to a filesystem-safe file stem.
fn url_slug(url: &str) -> String {
    let stripped = url.trim_start_matches("https://").trim_start_matches("http://");
    let slug: String = stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    slug.trim_matches('-').to_string()
}
