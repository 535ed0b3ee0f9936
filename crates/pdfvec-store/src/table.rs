//! Connection and housekeeping helpers for the `Documents` table.

use rusqlite::Connection;
use std::path::Path;

use pdfvec_core::types::{Embedding, StoredRecord};

use crate::error::Result;
use crate::schema::{COUNT_DOCUMENTS, CREATE_DOCUMENTS, SELECT_DOCUMENTS};

pub fn open_db(path: &Path) -> Result<Connection> {
    Ok(Connection::open(path)?)
}

/// Create the `Documents` table if it is missing. Existing rows are untouched.
pub fn ensure_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_DOCUMENTS)?;
    Ok(())
}

pub fn count_records(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row(COUNT_DOCUMENTS, [], |row| row.get(0))?;
    Ok(usize::try_from(n).unwrap_or_default())
}

/// All rows in insertion order, with the embedding column decoded.
pub fn load_records(conn: &Connection) -> Result<Vec<StoredRecord>> {
    let mut stmt = conn.prepare(SELECT_DOCUMENTS)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, u32>(2)?, row.get::<_, String>(3)?, row.get::<_, String>(4)?))
    })?;
    let mut records = Vec::new();
    for row in rows {
        let (id, filename, page, text, embedding) = row?;
        let embedding = Embedding::from_json(&embedding)?;
        records.push(StoredRecord { id, filename, page, text, embedding });
    }
    Ok(records)
}
