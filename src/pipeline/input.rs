//! Input resolution: turn a user-supplied path or URL into document bytes.
//!
//! The format is decided from the file extension (or, for URLs without one,
//! the `Content-Type` header) before anything is decoded, so an unsupported
//! upload is rejected with a clear message instead of a decoder failure. PDF
//! payloads are also checked for the `%PDF` magic bytes.

use crate::error::ExtractError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Accepted document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    /// Legacy Word. Read as lossy UTF-8, so usually only partially legible.
    Doc,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Match a file extension, case-insensitively, with or without a dot.
    pub fn from_extension(ext: &str) -> Result<Self, ExtractError> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "doc" => Ok(Self::Doc),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            other => Err(ExtractError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// Match a MIME type, ignoring parameters such as `charset`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence {
            "application/pdf" => Some(Self::Pdf),
            "application/msword" => Some(Self::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document payload with its declared format.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    /// Build from bytes and a file name, taking the format from its extension.
    pub fn from_named_bytes(
        bytes: impl Into<Vec<u8>>,
        file_name: &str,
    ) -> Result<Self, ExtractError> {
        let format = DocumentFormat::from_path(Path::new(file_name))?;
        Ok(Self::new(bytes, format))
    }

    /// Reject PDF payloads that do not start with `%PDF`.
    pub fn check_magic(&self) -> Result<(), ExtractError> {
        if self.format == DocumentFormat::Pdf
            && self.bytes.len() >= 4
            && &self.bytes[..4] != b"%PDF"
        {
            return Err(ExtractError::DecodeFailed {
                format: self.format.label().to_string(),
                detail: format!(
                    "not a PDF (starts with {:?})",
                    String::from_utf8_lossy(&self.bytes[..4])
                ),
            });
        }
        Ok(())
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a document.
///
/// If the input is a URL, download it. If the input is a local file, validate
/// its extension before reading it.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<RawDocument, ExtractError> {
    if input.trim().is_empty() {
        return Err(ExtractError::InvalidInput {
            input: input.to_string(),
        });
    }
    let doc = if is_url(input) {
        download_url(input, timeout_secs).await?
    } else {
        read_local(input).await?
    };
    doc.check_magic()?;
    Ok(doc)
}

async fn read_local(path_str: &str) -> Result<RawDocument, ExtractError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(ExtractError::FileNotFound { path });
    }
    let format = DocumentFormat::from_path(&path)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied { path });
        }
        Err(_) => return Err(ExtractError::FileNotFound { path }),
    };

    debug!("Read {} ({} bytes, {})", path.display(), bytes.len(), format);
    Ok(RawDocument::new(bytes, format))
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<RawDocument, ExtractError> {
    info!("Downloading resume from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ExtractError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ExtractError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ExtractError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let format = match url_extension(url) {
        Some(ext) => DocumentFormat::from_extension(&ext)?,
        None => response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(DocumentFormat::from_mime)
            .ok_or_else(|| ExtractError::UnsupportedFormat {
                extension: String::new(),
            })?,
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ExtractError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes ({})", bytes.len(), format);
    Ok(RawDocument::new(bytes.to_vec(), format))
}

/// Extension of the last URL path segment, if it has one.
fn url_extension(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_string())
}
