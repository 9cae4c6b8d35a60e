use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, info};
use url::Url;

use crate::config::{BrowserConfig, PrintConfig};
use crate::error::{Error, Result};

/// Turns a loaded HTML page into PDF bytes.
pub trait PdfPrinter {
    fn print(&self, uri: &Url, config: &PrintConfig) -> Result<Vec<u8>>;
}

/// Prints through a headless Chrome session launched per call.
#[derive(Debug, Clone, Default)]
pub struct ChromePrinter {
    browser: BrowserConfig,
}

impl ChromePrinter {
    pub fn new(browser: BrowserConfig) -> Self {
        Self { browser }
    }

    fn launch(&self) -> Result<Browser> {
        let timeout = Duration::from_secs(self.browser.timeout_secs);
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.browser.sandbox)
            .path(self.browser.chrome_path.clone())
            .idle_browser_timeout(timeout)
            .build()
            .map_err(|e| Error::Print(format!("invalid browser options: {e}")))?;

        Browser::new(options).map_err(|e| Error::Print(format!("failed to launch browser: {e:#}")))
    }
}

impl PdfPrinter for ChromePrinter {
    fn print(&self, uri: &Url, config: &PrintConfig) -> Result<Vec<u8>> {
        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::Print(format!("failed to open tab: {e:#}")))?;
        tab.set_default_timeout(Duration::from_secs(self.browser.timeout_secs));

        debug!("Navigating to {uri}");
        tab.navigate_to(uri.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| Error::Print(format!("failed to load {uri}: {e:#}")))?;

        let pdf = tab
            .print_to_pdf(Some(pdf_options(config)))
            .map_err(|e| Error::Print(format!("print failed: {e:#}")))?;
        info!("Printed {} bytes", pdf.len());

        // Dropping the browser closes the session
        Ok(pdf)
    }
}

/// Print options for a page layout. Backgrounds are never printed.
pub fn pdf_options(config: &PrintConfig) -> PrintToPdfOptions {
    let mut options = PrintToPdfOptions {
        landscape: Some(config.landscape),
        print_background: Some(false),
        margin_top: Some(config.margins.top),
        margin_bottom: Some(config.margins.bottom),
        margin_left: Some(config.margins.left),
        margin_right: Some(config.margins.right),
        paper_width: Some(config.paper.width),
        paper_height: Some(config.paper.height),
        ..Default::default()
    };

    if let Some(footer) = &config.footer_template {
        options.display_header_footer = Some(true);
        options.header_template = Some(config.header_template.clone());
        options.footer_template = Some(footer.clone());
    }

    options
}
