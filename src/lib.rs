//! cirque-crawler - Headless-browser product scraper for the Cirque Colors storefront
//!
//! Extracts normalized product records (title, price, variants, images,
//! descriptions) from rendered product pages and expands variant products
//! into one record per selectable variant.

pub mod browser;
pub mod cirque;
pub mod commands;
pub mod config;
pub mod format;
pub mod page;
pub mod text;

pub use cirque::models::{
    DescriptionPlacement, DescriptionSection, Product, ScrapeRequest, ScrapeResult, Variant,
};
pub use cirque::scraper::ProductScraper;
pub use config::Config;
pub use page::{PageError, ProductPage};
