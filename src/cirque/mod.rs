//! Cirque Colors storefront modules: extractors, assembly, and variant expansion.

pub mod assemble;
pub mod extract;
pub mod models;
pub mod overrides;
pub mod scraper;
pub mod selectors;

pub use models::{DescriptionPlacement, DescriptionSection, Product, ScrapeRequest, ScrapeResult, Variant};
pub use scraper::ProductScraper;
