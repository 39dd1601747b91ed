//! Delimited text reading and splitting.

mod reader;
mod record;

pub use reader::{MAX_TEXT_FILE_SIZE, read_text_file, read_text_file_async};
pub use record::{Delimiter, RawRecord, parse};
