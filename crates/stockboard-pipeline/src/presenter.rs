//! Table rendering for joined product records.
//!
//! A [`Presenter`] receives the whole product collection on every refresh
//! and a short status line at phase boundaries. [`HtmlTablePresenter`]
//! rewrites a standalone HTML document each time; [`RecordingPresenter`]
//! keeps every call in memory.

use std::path::{Path, PathBuf};

use stockboard_core::ProductRecord;
use thiserror::Error;

pub const STATUS_FETCHING_AVAILABILITY: &str = "Fetching availability data ...";
pub const STATUS_DONE: &str = "Done !!!";

const HEADER: [&str; 4] = ["Name", "Type", "Price", "Availability"];

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("output directory {} does not exist", path.display())]
    MissingTarget { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Receives refreshes from the pipeline.
pub trait Presenter {
    /// Replaces the displayed table with `products`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError`] if the output cannot be updated.
    fn render(&mut self, products: &[ProductRecord]) -> Result<(), PresentError>;

    /// Replaces the status line.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError`] if the output cannot be updated.
    fn set_status(&mut self, status: &str) -> Result<(), PresentError>;
}

/// One data row of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub product_type: String,
    pub price: String,
    pub availability: String,
}

impl From<&ProductRecord> for TableRow {
    fn from(product: &ProductRecord) -> Self {
        Self {
            name: product.name.clone(),
            product_type: product.product_type.clone(),
            price: product.display_price(),
            availability: product.availability.clone(),
        }
    }
}

impl TableRow {
    fn cells(&self) -> [&str; 4] {
        [
            &self.name,
            &self.product_type,
            &self.price,
            &self.availability,
        ]
    }
}

/// Writes the status line and table into an HTML file, rebuilt wholesale on
/// every call.
#[derive(Debug)]
pub struct HtmlTablePresenter {
    path: PathBuf,
    status: String,
    rows: Vec<TableRow>,
}

impl HtmlTablePresenter {
    /// Creates a presenter for `path` and writes an empty board to it.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::MissingTarget`] if the parent directory does
    /// not exist, or [`PresentError::Write`] if the initial write fails.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, PresentError> {
        let path = path.into();
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !parent.is_dir() {
            return Err(PresentError::MissingTarget {
                path: parent.to_path_buf(),
            });
        }

        let presenter = Self {
            path,
            status: String::new(),
            rows: Vec::new(),
        };
        presenter.flush()?;
        Ok(presenter)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PresentError> {
        let document = render_document(&self.status, &self.rows);
        std::fs::write(&self.path, document).map_err(|source| PresentError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Presenter for HtmlTablePresenter {
    fn render(&mut self, products: &[ProductRecord]) -> Result<(), PresentError> {
        self.rows = products.iter().map(TableRow::from).collect();
        self.flush()
    }

    fn set_status(&mut self, status: &str) -> Result<(), PresentError> {
        status.clone_into(&mut self.status);
        self.flush()
    }
}

/// Keeps every render and status update, in call order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub renders: Vec<Vec<TableRow>>,
    pub statuses: Vec<String>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn last_render(&self) -> Option<&[TableRow]> {
        self.renders.last().map(Vec::as_slice)
    }

    #[must_use]
    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, products: &[ProductRecord]) -> Result<(), PresentError> {
        self.renders
            .push(products.iter().map(TableRow::from).collect());
        Ok(())
    }

    fn set_status(&mut self, status: &str) -> Result<(), PresentError> {
        self.statuses.push(status.to_owned());
        Ok(())
    }
}

/// Renders the full HTML document: status paragraph, then the table.
#[must_use]
pub fn render_document(status: &str, rows: &[TableRow]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Stockboard</title>\n</head>\n<body>\n",
    );
    html.push_str("<p id=\"status\">");
    html.push_str(&escape_html(status));
    html.push_str("</p>\n");
    html.push_str(&render_table(rows));
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the table: the fixed header row followed by one row per entry.
#[must_use]
pub fn render_table(rows: &[TableRow]) -> String {
    let mut html = String::from("<table>\n");
    push_row(&mut html, "th", HEADER);
    for row in rows {
        push_row(&mut html, "td", row.cells());
    }
    html.push_str("</table>\n");
    html
}

fn push_row(html: &mut String, cell_tag: &str, cells: [&str; 4]) {
    html.push_str("<tr>");
    for cell in cells {
        html.push('<');
        html.push_str(cell_tag);
        html.push('>');
        html.push_str(&escape_html(cell));
        html.push_str("</");
        html.push_str(cell_tag);
        html.push('>');
    }
    html.push_str("</tr>\n");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "presenter_test.rs"]
mod tests;
