//! Output formatting for scraped products (table, JSON, markdown).

use crate::cirque::models::Product;
use crate::config::OutputFormat;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Id:       {}", product.id));
        lines.push(format!("Title:    {}", product.title));
        lines.push(format!("URL:      {}", product.url));
        lines.push(format!("Brand:    {}", product.brand));
        lines.push(format!("Price:    {}", price_cell(product.real_price, &product.currency)));

        if product.higher_price.is_finite() {
            lines.push(format!(
                "Was:      {}",
                price_cell(product.higher_price, &product.currency)
            ));
        }

        lines.push(format!(
            "Stock:    {}",
            if product.availability { "Available" } else { "Unavailable" }
        ));

        if !product.color.is_empty() {
            lines.push(format!("Color:    {}", product.color));
        }

        if let Some(size) = &product.size {
            lines.push(format!("Size:     {}", size));
        }

        if !product.breadcrumbs.is_empty() {
            lines.push(format!("Path:     {}", product.breadcrumbs.join(" > ")));
        }

        lines.push(format!("Images:   {}", product.images.len()));
        lines.push(format!("Sections: {}", product.additional_sections.len()));

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 28;
        let price_width = 10;
        let color_width = 24;
        let stock_width = 5;
        let title_width = 40;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<color_width$}  {:<stock_width$}  {}",
            "Id", "Price", "Color", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<color_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        // Rows
        for product in products {
            let stock = if product.availability { "Yes" } else { "No" };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:<color_width$}  {:<stock_width$}  {}",
                truncate(&product.id, id_width),
                price_cell(product.real_price, &product.currency),
                truncate(&product.color, color_width),
                stock,
                truncate(&product.title, title_width),
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());

        lines.push(format!("- **Id:** {}", product.id));
        lines.push(format!("- **URL:** [{}]({})", product.url, product.url));
        lines.push(format!("- **Price:** {}", price_cell(product.real_price, &product.currency)));

        if product.higher_price.is_finite() {
            lines.push(format!(
                "- **Was:** {}",
                price_cell(product.higher_price, &product.currency)
            ));
        }

        lines.push(format!(
            "- **Stock:** {}",
            if product.availability { "Available" } else { "Unavailable" }
        ));

        if !product.color.is_empty() {
            lines.push(format!("- **Color:** {}", product.color));
        }

        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        if !product.images.is_empty() {
            lines.push(String::new());
            lines.push("### Images".to_string());
            for image in &product.images {
                lines.push(format!("- {}", image));
            }
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| Id | Price | Color | Stock | Title |".to_string());
        lines.push("|----|-------|-------|-------|-------|".to_string());

        for product in products {
            let stock = if product.availability { "✓" } else { "" };

            lines.push(format!(
                "| {} | {} | {} | {} | [{}]({}) |",
                product.id,
                price_cell(product.real_price, &product.currency),
                product.color,
                stock,
                truncate(&product.title, 40),
                product.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }
}

fn price_cell(price: f64, currency: &str) -> String {
    if price.is_finite() {
        if currency.is_empty() {
            format!("{:.2}", price)
        } else {
            format!("{} {:.2}", currency, price)
        }
    } else {
        "N/A".to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
