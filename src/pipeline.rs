use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::{Builder, TempPath};
use url::Url;

use crate::config::PrintConfig;
use crate::error::{Error, Result};
use crate::print::PdfPrinter;
use crate::render::markdown_to_html_page;
use crate::toc::{TOC_MARKER, insert_toc};

/// Prefix of the intermediate HTML file.
pub const TEMP_HTML_PREFIX: &str = "md-html-temp";

/// One markdown → PDF conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    input: PathBuf,
    output: PathBuf,
    work_dir: PathBuf,
    print: PrintConfig,
}

impl Conversion {
    /// Convert `input` to `<input-stem>.pdf` next to it, staging HTML in the
    /// current directory.
    pub fn new(input: impl Into<PathBuf>, print: PrintConfig) -> Self {
        let input = input.into();
        let output = default_output(&input);
        Self {
            input,
            output,
            work_dir: PathBuf::from("."),
            print,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Directory holding the intermediate HTML file.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run every step, returning the written PDF path.
    ///
    /// The intermediate HTML file is removed on every path out of this
    /// function; on success its removal is checked.
    pub fn run(&self, printer: &impl PdfPrinter) -> Result<PathBuf> {
        if !self.input.exists() {
            return Err(Error::InputNotFound(self.input.clone()));
        }

        let bytes = fs::read(&self.input).map_err(|source| Error::ReadMarkdown {
            path: self.input.clone(),
            source,
        })?;
        // Markdown is not validated; undecodable bytes become U+FFFD
        let markdown = String::from_utf8_lossy(&bytes);

        let markdown = insert_toc(&markdown, TOC_MARKER);
        let html = markdown_to_html_page(&markdown, &self.fallback_title());

        let temp = self.write_temp_html(&html)?;
        let uri = file_url(&temp)?;

        debug!("Rendering {} via {}", self.input.display(), uri);
        let pdf = printer.print(&uri, &self.print)?;

        fs::write(&self.output, pdf).map_err(|source| Error::WritePdf {
            path: self.output.clone(),
            source,
        })?;
        info!("Wrote {}", self.output.display());

        temp.close().map_err(Error::DeleteTemp)?;
        Ok(self.output.clone())
    }

    fn fallback_title(&self) -> String {
        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Write the page to a uniquely named file; it is deleted when the
    /// returned path is dropped.
    fn write_temp_html(&self, html: &str) -> Result<TempPath> {
        let mut file = Builder::new()
            .prefix(TEMP_HTML_PREFIX)
            .suffix(".html")
            .tempfile_in(&self.work_dir)
            .map_err(Error::CreateTemp)?;

        file.write_all(html.as_bytes())
            .and_then(|()| file.flush())
            .map_err(Error::WriteTemp)?;

        debug!("Staged HTML at {}", file.path().display());
        Ok(file.into_temp_path())
    }
}

/// `<input-stem>.pdf` in the input's directory.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn file_url(path: &Path) -> Result<Url> {
    let absolute =
        std::path::absolute(path).map_err(|_| Error::ResolvePath(path.to_path_buf()))?;
    Url::from_file_path(&absolute).map_err(|()| Error::ResolvePath(absolute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_replaces_extension() {
        assert_eq!(default_output(Path::new("docs/guide.md")), PathBuf::from("docs/guide.pdf"));
        assert_eq!(default_output(Path::new("README")), PathBuf::from("README.pdf"));
        assert_eq!(
            default_output(Path::new("notes.v2.markdown")),
            PathBuf::from("notes.v2.pdf")
        );
    }

    #[test]
    fn file_url_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        let url = file_url(&path).unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.to_file_path().unwrap(), path);
    }

    #[test]
    fn fallback_title_is_the_stem() {
        let conversion = Conversion::new("dir/report.md", PrintConfig::default());
        assert_eq!(conversion.fallback_title(), "report");
        assert_eq!(conversion.output(), Path::new("dir/report.pdf"));
    }
}
