use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pdfvec_core::types::NewRecord;

use crate::error::{Error, Result};
use crate::schema::{INSERT_DOCUMENT, TABLE_NAME};
use crate::table::{ensure_table, open_db};

/// Append-only writer for the `Documents` table.
///
/// Rows are buffered in memory and written in a single transaction once
/// `commit_interval` of them have accumulated, or when [`commit`](Self::commit)
/// is called. Dropping the writer closes the connection and discards anything
/// still buffered; only committed rows are durable.
pub struct StoreWriter {
    conn: Connection,
    path: PathBuf,
    commit_interval: usize,
    pending: Vec<NewRecord>,
    committed: usize,
    commits: usize,
}

impl StoreWriter {
    /// Open or create the store at `path` and make sure the table exists.
    /// Safe to call against an existing store; rows are never removed.
    pub fn initialize(path: &Path, commit_interval: usize) -> Result<Self> {
        if commit_interval == 0 { return Err(Error::InvalidCommitInterval); }
        let conn = open_db(path)?;
        ensure_table(&conn)?;
        info!(path = %path.display(), table = TABLE_NAME, commit_interval, "Store ready");
        Ok(Self { conn, path: path.to_path_buf(), commit_interval, pending: Vec::with_capacity(commit_interval), committed: 0, commits: 0 })
    }

    /// Buffer one record. Commits when the buffer reaches `commit_interval`.
    pub fn append(&mut self, record: NewRecord) -> Result<()> {
        self.pending.push(record);
        if self.pending.len() >= self.commit_interval { self.commit()?; }
        Ok(())
    }

    /// Write everything buffered in one transaction and commit it, even when
    /// the buffer is empty. Each call counts as one commit event.
    pub fn commit(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_DOCUMENT)?;
            for record in &self.pending {
                stmt.execute(params![record.filename, record.page, record.text, record.embedding.to_json()?])?;
            }
        }
        tx.commit()?;
        let last_page = self.pending.last().map(|r| r.page);
        self.committed += self.pending.len();
        self.commits += 1;
        self.pending.clear();
        match last_page {
            Some(page) => info!(committed = self.committed, "Committed {} records up to page {}.", self.committed, page),
            None => debug!(committed = self.committed, "Commit with no buffered records"),
        }
        Ok(())
    }

    /// Release the connection. Refuses while records are still buffered; the
    /// connection is closed either way.
    pub fn close(self) -> Result<()> {
        let Self { conn, pending, path, .. } = self;
        if !pending.is_empty() { return Err(Error::Uncommitted(pending.len())); }
        conn.close().map_err(|(_, e)| Error::Sqlite(e))?;
        debug!(path = %path.display(), "Store closed");
        Ok(())
    }

    pub fn connection(&self) -> &Connection { &self.conn }

    /// Records buffered since the last commit.
    pub fn pending(&self) -> usize { self.pending.len() }

    /// Records committed by this writer.
    pub fn committed(&self) -> usize { self.committed }

    /// Commit events performed by this writer.
    pub fn commits(&self) -> usize { self.commits }
}
