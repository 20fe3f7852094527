//! Headless-Chrome implementation of the [`ProductPage`] interface.
//!
//! This is collaborator glue only: the pipeline never sees chromiumoxide
//! types, and everything here maps one trait method onto one or two CDP
//! calls. Browser acquisition and release happen at the CLI layer.

use crate::config::Config;
use crate::page::{PageError, ProductPage};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Poll cadence for bounded waits (globals, selectors).
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A launched browser plus its CDP event pump.
pub struct BrowserHandle {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserHandle {
    /// Launches a headless browser configured from `config`.
    pub async fn launch(config: &Config) -> Result<Self> {
        info!("Launching headless browser");

        let mut builder = BrowserConfig::builder()
            .window_size(config.window_width, config.window_height)
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--hide-scrollbars")
            .arg("--mute-audio");

        if let Some(path) = &config.chrome_path {
            debug!("Using Chrome executable: {}", path);
            builder = builder.chrome_executable(path.as_str());
        }

        let browser_config = builder.build().map_err(|e| anyhow!(e))?;

        let (browser, mut handler) =
            Browser::launch(browser_config).await.context("Failed to launch browser")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler_task })
    }

    /// Opens a fresh page.
    pub async fn new_page(&self) -> Result<CdpPage> {
        let page =
            self.browser.new_page("about:blank").await.context("Failed to open a new page")?;
        Ok(CdpPage { page })
    }

    /// Closes the browser and waits for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await.context("Failed to close browser")?;
        self.browser.wait().await.context("Browser did not exit cleanly")?;
        self.handler_task.abort();
        Ok(())
    }
}

/// One CDP-driven page.
pub struct CdpPage {
    page: Page,
}

fn protocol(err: impl std::fmt::Display) -> PageError {
    PageError::Protocol(err.to_string())
}

/// Quotes a string as a JS literal.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Probe returning the named `window` global as JSON text, or null while it
/// is still undefined.
fn global_probe_script(name: &str) -> String {
    let key = js_string(name);
    format!("typeof window[{key}] === 'undefined' ? null : JSON.stringify(window[{key}])")
}

/// Sets a `<select>` to the given option value and fires its change
/// handlers; yields false when the control is missing.
fn select_script(selector: &str, value: &str) -> String {
    format!(
        "(function() {{\n\
           var select = document.querySelector({selector});\n\
           if (!select) return false;\n\
           select.value = {value};\n\
           select.dispatchEvent(new Event('change', {{ bubbles: true }}));\n\
           return true;\n\
         }})()",
        selector = js_string(selector),
        value = js_string(value),
    )
}

#[async_trait]
impl ProductPage for CdpPage {
    async fn goto(&self, url: &str) -> Result<(), PageError> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await.map_err(protocol)?;
        self.page.wait_for_navigation().await.map_err(protocol)?;
        Ok(())
    }

    async fn wait_for_global(
        &self,
        name: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, PageError> {
        let script = global_probe_script(name);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let result = self.page.evaluate(script.as_str()).await.map_err(protocol)?;
            if let Ok(Some(text)) = result.into_value::<Option<String>>() {
                return serde_json::from_str(&text).map_err(|e| {
                    PageError::Protocol(format!("window.{name} is not valid JSON: {e}"))
                });
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(PageError::Timeout { what: format!("window.{name}"), timeout });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn content(&self) -> Result<String, PageError> {
        self.page.content().await.map_err(protocol)
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(PageError::Timeout { what: selector.to_string(), timeout });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), PageError> {
        let script = select_script(selector, value);
        let result = self.page.evaluate(script.as_str()).await.map_err(protocol)?;
        let selected = result.into_value::<bool>().map_err(protocol)?;

        if !selected {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(protocol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_probe_script_quotes_name() {
        let script = global_probe_script("BCData");
        assert!(script.contains("window[\"BCData\"]"));
        assert!(script.contains("JSON.stringify"));
    }

    #[test]
    fn test_select_script_escapes_arguments() {
        let script = select_script(".form-select", "12");
        assert!(script.contains("document.querySelector(\".form-select\")"));
        assert!(script.contains("select.value = \"12\""));

        // Quotes in values must not break out of the JS literal
        let script = select_script(".form-select", "a\"b");
        assert!(script.contains(r#"select.value = "a\"b""#));
    }
}
