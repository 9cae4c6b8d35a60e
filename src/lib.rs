mod config;
mod error;
mod parser;
mod pipeline;
mod print;
mod render;
mod slug;
mod toc;
mod tree;

pub use config::{
    BrowserConfig, Config, DEFAULT_HEADER_TEMPLATE, Margins, PageConfig, Paper, PaperSize,
    PrintConfig, TemplateConfig, load_footer_template,
};
pub use error::{Error, Result};
pub use pipeline::{Conversion, TEMP_HTML_PREFIX, default_output};
pub use print::{ChromePrinter, PdfPrinter, pdf_options};
pub use render::{document_title, markdown_to_html, markdown_to_html_page};
pub use slug::slugify;
pub use toc::{MAX_TOC_LEVEL, TOC_MARKER, generate_toc, insert_toc};
pub use tree::{Document, Node};

/// Parse markdown text into a document tree.
pub fn parse(markdown: &str) -> Document {
    parser::parse(markdown)
}

