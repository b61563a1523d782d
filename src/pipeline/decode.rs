//! Decoding: document bytes → positioned PDF fragments or plain text.
//!
//! ## Why spawn_blocking?
//!
//! pdfium is a C++ library with thread-local state, and docx-rs parses a whole
//! zip archive in one call. Both are CPU-bound and synchronous, so the async
//! entry point moves them onto tokio's blocking pool.
//!
//! ## Binding pdfium
//!
//! `PDFIUM_LIB_PATH` may name the library file or the directory holding it.
//! Without it the system library search path is used.

use crate::error::ExtractError;
use crate::pipeline::input::{DocumentFormat, RawDocument};
use crate::pipeline::layout::TextFragment;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a decoder produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedText {
    /// One fragment list per PDF page, in content-stream order.
    Pages(Vec<Vec<TextFragment>>),
    /// Text that already carries its own line breaks.
    Plain(String),
}

impl DecodedText {
    /// Pages decoded; 0 for plain-text formats.
    pub fn page_count(&self) -> usize {
        match self {
            DecodedText::Pages(pages) => pages.len(),
            DecodedText::Plain(_) => 0,
        }
    }
}

/// Decode a document on the blocking thread pool.
pub async fn decode(doc: RawDocument, password: Option<String>) -> Result<DecodedText, ExtractError> {
    tokio::task::spawn_blocking(move || decode_blocking(&doc, password.as_deref()))
        .await
        .map_err(|e| ExtractError::Internal(format!("Decode task panicked: {}", e)))?
}

/// Blocking implementation of [`decode`].
pub fn decode_blocking(
    doc: &RawDocument,
    password: Option<&str>,
) -> Result<DecodedText, ExtractError> {
    match doc.format {
        DocumentFormat::Pdf => decode_pdf(&doc.bytes, password).map(DecodedText::Pages),
        DocumentFormat::Docx => decode_docx(&doc.bytes).map(DecodedText::Plain),
        DocumentFormat::Txt | DocumentFormat::Doc => Ok(DecodedText::Plain(decode_plain(&doc.bytes))),
    }
}

/// UTF-8 with invalid sequences replaced and a leading BOM dropped.
pub fn decode_plain(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

fn bind_pdfium() -> Result<Pdfium, ExtractError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(p) => {
            let path = PathBuf::from(p);
            let lib = if path.is_dir() {
                path.join(Pdfium::pdfium_platform_library_name())
            } else {
                path
            };
            debug!("Binding pdfium from {}", lib.display());
            Pdfium::bind_to_library(&lib)
        }
        Err(_) => Pdfium::bind_to_system_library(),
    };
    bindings
        .map(Pdfium::new)
        .map_err(|e| ExtractError::PdfiumBindingFailed(e.to_string()))
}

fn decode_pdf(bytes: &[u8], password: Option<&str>) -> Result<Vec<Vec<TextFragment>>, ExtractError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium.load_pdf_from_byte_slice(bytes, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ExtractError::WrongPassword
            } else {
                ExtractError::PasswordRequired
            }
        } else {
            ExtractError::DecodeFailed {
                format: DocumentFormat::Pdf.label().to_string(),
                detail: err_str,
            }
        }
    })?;

    let mut pages = Vec::new();
    for (idx, page) in document.pages().iter().enumerate() {
        let text = page.text().map_err(|e| ExtractError::DecodeFailed {
            format: DocumentFormat::Pdf.label().to_string(),
            detail: format!("page {}: {:?}", idx + 1, e),
        })?;

        let fragments: Vec<TextFragment> = text
            .segments()
            .iter()
            .map(|segment| TextFragment::new(segment.text(), segment.bounds().bottom().value))
            .collect();

        debug!("Page {} → {} fragments", idx + 1, fragments.len());
        pages.push(fragments);
    }

    info!("PDF decoded: {} pages", pages.len());
    Ok(pages)
}

#[cfg(feature = "docx")]
fn decode_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    use docx_rs::{DocumentChild, TableCellContent, TableChild, TableRowChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::DecodeFailed {
        format: DocumentFormat::Docx.label().to_string(),
        detail: e.to_string(),
    })?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => paragraphs.push(docx_paragraph_text(p)),
            DocumentChild::Table(t) => {
                for row in &t.rows {
                    let TableChild::TableRow(r) = row;
                    for cell in &r.cells {
                        let TableRowChild::TableCell(c) = cell;
                        for content in &c.children {
                            if let TableCellContent::Paragraph(p) = content {
                                paragraphs.push(docx_paragraph_text(p));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let text = paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    debug!("DOCX decoded: {} bytes of text", text.len());
    Ok(text)
}

#[cfg(feature = "docx")]
fn docx_paragraph_text(p: &docx_rs::Paragraph) -> String {
    use docx_rs::ParagraphChild;

    let mut text = String::new();
    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run_text(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for inner in &h.children {
                    if let ParagraphChild::Run(r) = inner {
                        push_run_text(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

#[cfg(feature = "docx")]
fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    use docx_rs::RunChild;

    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(not(feature = "docx"))]
fn decode_docx(_bytes: &[u8]) -> Result<String, ExtractError> {
    Err(ExtractError::UnsupportedFormat {
        extension: "docx".to_string(),
    })
}
