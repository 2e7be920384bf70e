//! BOK release-page scraping and PDF text extraction.
//!
//! The publication page lists one report per table row with a download
//! anchor inside a file-group box. Relative hrefs are resolved against the
//! page URL.

use econodoc::{Error, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{Html, Selector};

/// One downloadable report PDF found on the release page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLink {
    /// Link text, normally the report filename.
    pub filename: String,
    /// Absolute download URL.
    pub url: String,
}

/// Scrape the release page for downloadable report PDFs, in page order.
pub fn pdf_links(http: &Client, page_url: &str) -> Result<Vec<PdfLink>> {
    let response = http
        .get(page_url)
        .send()
        .map_err(|e| Error::Upstream(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Error::UpstreamStatus {
            status: response.status().as_u16(),
            url: page_url.to_string(),
        });
    }
    let html = response
        .text()
        .map_err(|e| Error::Upstream(e.to_string()))?;

    let base = Url::parse(page_url).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    Ok(parse_pdf_links(&html, &base))
}

fn parse_pdf_links(html: &str, base: &Url) -> Vec<PdfLink> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table#tableId tbody tr").unwrap();
    let link_selector = Selector::parse("div.fileGoupBox a.i-download[href]").unwrap();

    let mut links = Vec::new();
    for row in document.select(&row_selector) {
        let Some(anchor) = row.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href) else {
            continue;
        };
        let filename = anchor.text().collect::<String>().trim().to_string();
        if filename.is_empty() {
            continue;
        }
        links.push(PdfLink {
            filename,
            url: url.to_string(),
        });
    }
    debug!("found {} pdf links", links.len());
    links
}

/// Download a report PDF into memory.
pub fn download_pdf(http: &Client, url: &str) -> Result<Vec<u8>> {
    let response = http
        .get(url)
        .send()
        .map_err(|e| Error::Upstream(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Error::UpstreamStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response
        .bytes()
        .map_err(|e| Error::Upstream(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Extract plain text from in-memory PDF bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| Error::Other(format!("PDF extraction failed: {}", e)))
}
