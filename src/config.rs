use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Header shown when a footer template turns on header/footer display.
pub const DEFAULT_HEADER_TEMPLATE: &str = "<span class=title></span>";

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub template: TemplateConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: Paper,
    /// Overrides the paper preset width, in inches
    pub width: Option<f64>,
    /// Overrides the paper preset height, in inches
    pub height: Option<f64>,
    pub landscape: bool,
    pub margins: Margins,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: Paper::A4,
            width: None,
            height: None,
            landscape: false,
            margins: Margins::default(),
        }
    }
}

/// Page margins in inches
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.8,
            bottom: 0.8,
            left: 0.8,
            right: 0.8,
        }
    }
}

/// Named paper sizes
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    #[default]
    A4,
    Letter,
    Legal,
}

impl Paper {
    /// Width and height in inches, portrait.
    pub fn size(self) -> PaperSize {
        match self {
            Paper::A4 => PaperSize {
                width: 8.27,
                height: 11.69,
            },
            Paper::Letter => PaperSize {
                width: 8.5,
                height: 11.0,
            },
            Paper::Legal => PaperSize {
                width: 8.5,
                height: 14.0,
            },
        }
    }
}

/// Paper dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    pub header: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Upper bound for each wait on the browser (navigation, printing)
    pub timeout_secs: u64,
    /// Chrome/Chromium executable; searched for when unset
    pub chrome_path: Option<PathBuf>,
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            chrome_path: None,
            sandbox: true,
        }
    }
}

/// Page layout handed to the printer. Built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    pub margins: Margins,
    pub paper: PaperSize,
    pub landscape: bool,
    pub header_template: String,
    /// Header/footer display is only enabled when this is set
    pub footer_template: Option<String>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Config::default().print_config(None)
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read config {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                warn!("Invalid config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Paper size after applying explicit dimensions.
    pub fn paper_size(&self) -> PaperSize {
        let preset = self.page.paper.size();
        PaperSize {
            width: self.page.width.unwrap_or(preset.width),
            height: self.page.height.unwrap_or(preset.height),
        }
    }

    /// Freeze the page settings into a [`PrintConfig`].
    pub fn print_config(&self, footer_template: Option<String>) -> PrintConfig {
        PrintConfig {
            margins: self.page.margins,
            paper: self.paper_size(),
            landscape: self.page.landscape,
            header_template: self.template.header.clone(),
            footer_template,
        }
    }
}

/// Read a footer template, or `None` with a warning when it is unusable.
///
/// Empty templates count as absent.
pub fn load_footer_template(path: &Path) -> Option<String> {
    if !path.exists() {
        warn!("Footer template not found: {}", path.display());
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) if content.is_empty() => {
            warn!("Footer template is empty: {}", path.display());
            None
        }
        Ok(content) => {
            info!("Using footer template: {}", path.display());
            Some(content)
        }
        Err(e) => {
            warn!("Failed to read footer template {}: {}", path.display(), e);
            None
        }
    }
}
