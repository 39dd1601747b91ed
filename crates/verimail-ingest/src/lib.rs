//! Address ingestion utilities.
//!
//! This crate turns user input into a candidate list of email addresses.
//!
//! # Features
//!
//! - **Delimited text parsing**: split an uploaded blob into a header line and
//!   raw rows ([`parse`])
//! - **Column inference**: locate the email column by header name
//!   ([`infer_email_column`])
//! - **Extraction**: pull the selected column out of every row, keeping only
//!   values that contain `@` ([`extract`])
//! - **Sessions**: re-run parsing or extraction when the file, delimiter, or
//!   column selection changes ([`IngestSession`])
//!
//! Parsing never fails. Malformed input degrades to an empty or partial
//! address list; only file access reports errors.
//!
//! # Example
//!
//! ```ignore
//! use verimail_ingest::{ColumnMatch, Delimiter, extract, infer_email_column, parse};
//!
//! let record = parse("name,email\nAda,ada@example.com\n", Delimiter::Comma);
//! if let ColumnMatch::Found(index) = infer_email_column(record.headers()) {
//!     let column = &record.headers()[index];
//!     let addresses = extract(&record, column, Delimiter::Comma);
//! }
//! ```

mod column;
mod error;
mod extract;
mod input;
mod session;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use text::{
    Delimiter, MAX_TEXT_FILE_SIZE, RawRecord, parse, read_text_file, read_text_file_async,
};

// === Column Inference ===
pub use column::{ColumnMatch, EMAIL_HEADER_TOKENS, infer_email_column};

// === Extraction ===
pub use extract::{ExtractOptions, extract, extract_with};

// === Sessions & Typed Input ===
pub use input::split_address_input;
pub use session::IngestSession;
