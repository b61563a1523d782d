//! Pipeline stages for resume extraction.
//!
//! Each submodule implements exactly one transformation step, so every
//! heuristic can be tested on plain strings without a decoder in the loop.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ layout ──▶ sections ──▶ entries ──▶ fields ──▶ sort
//! (path/URL) (pdfium,   (PDF only)  (headings)   (blocks)    (entries)  (recency)
//!            docx-rs)
//! ```
//!
//! 1. [`input`]: resolve a path or URL to bytes and a [`input::DocumentFormat`]
//! 2. [`decode`]: bytes to positioned fragments (PDF) or plain text; runs
//!    in `spawn_blocking`
//! 3. [`layout`]: rebuild lines and paragraph breaks from fragment Y gaps
//! 4. [`sections`]: bucket lines under the heading that precedes them
//! 5. [`entries`]: cut the experience and education sections into blocks
//! 6. [`fields`]: company, position, dates, location, description per block
//! 7. [`sort`]: most recent job first
//!
//! [`contact`], [`skills`] and [`fallback`] supply the document-level fields
//! and the rules that keep a draft well-formed when structure is missing.
//! [`normalize`] cleans decoded text before segmentation, and [`patterns`]
//! holds the regexes the stages share.

pub mod contact;
pub mod decode;
pub mod entries;
pub mod fallback;
pub mod fields;
pub mod input;
pub mod layout;
pub mod normalize;
pub mod patterns;
pub mod sections;
pub mod skills;
pub mod sort;
