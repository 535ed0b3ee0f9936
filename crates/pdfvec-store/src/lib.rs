//! SQLite persistence for page embeddings.
//!
//! [`StoreWriter`] buffers rows and writes them in one transaction every
//! `commit_interval` appends; `table` holds the schema helpers and read-back
//! used for verification.

pub mod error;
pub mod schema;
pub mod table;
pub mod writer;

pub use error::{Error, Result};
pub use pdfvec_core::config::DB_FILENAME;
pub use writer::StoreWriter;
