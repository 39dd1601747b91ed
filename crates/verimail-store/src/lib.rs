//! Durable storage for the verimail session.
//!
//! The session is a handful of named JSON values that survive restarts:
//! the last submitted address list, the last result set, and two view
//! preferences. Storage is reached through the [`StoragePort`] trait so the
//! session logic runs unchanged against memory or a file on disk.
//!
//! # Features
//!
//! - **Storage port**: `get`/`set`/`remove` of JSON values by key
//! - **File store**: one JSON document, written atomically (temp file + rename)
//! - **Session keys**: typed accessors for the persisted session
//!   ([`SessionStore`])
//!
//! Corrupt values are logged and read as absent. Write failures are
//! returned to the caller.
//!
//! # Example
//!
//! ```ignore
//! use verimail_store::{FileStore, SessionStore};
//!
//! let store = FileStore::open("session.json")?;
//! let mut session = SessionStore::new(store);
//! session.save_addresses(&["a@example.com".to_string()])?;
//! assert_eq!(session.addresses(), ["a@example.com"]);
//! ```

mod error;
mod file;
mod memory;
mod port;
mod session;

// === Error Types ===
pub use error::{Result, StoreError};

// === Storage Backends ===
pub use file::{FileStore, default_session_path};
pub use memory::MemoryStore;
pub use port::StoragePort;

// === Session ===
pub use session::{ADDRESSES_KEY, RESULTS_KEY, SHOW_CHART_KEY, SessionStore, VIEW_KEY};
