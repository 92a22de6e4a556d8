//! Income ledger repository
//!
//! Handles persistence of confirmed incomes to a single SQLite table. Rows are
//! append-only: there is no update or delete.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::SplitterError;
use crate::models::{IncomeDraft, IncomeRecord, LedgerTotals, RecordId};

/// Format of the `created_at` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS incomes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL,
        source TEXT NOT NULL,
        total_amount REAL NOT NULL,
        daily_expenses REAL NOT NULL,
        investments REAL NOT NULL,
        cushion REAL NOT NULL,
        dream REAL NOT NULL
    );
";

/// Repository for confirmed income records
pub struct LedgerRepository {
    conn: Connection,
}

impl LedgerRepository {
    /// Open (or create) the ledger database at `path`
    pub fn open(path: &Path) -> Result<Self, SplitterError> {
        let conn = Connection::open(path).map_err(|e| {
            SplitterError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Ok(Self { conn })
    }

    /// Open a private in-memory ledger
    pub fn open_in_memory() -> Result<Self, SplitterError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the income table if it is missing. Safe to call on every start.
    pub fn initialize(&self) -> Result<(), SplitterError> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(|e| SplitterError::Storage(format!("Failed to create schema: {}", e)))
    }

    /// Insert one confirmed income, stamped with the local time
    pub fn append(&self, draft: &IncomeDraft) -> Result<RecordId, SplitterError> {
        let created_at = Local::now().format(TIMESTAMP_FORMAT).to_string();

        self.conn
            .execute(
                "INSERT INTO incomes (
                    created_at, source, total_amount,
                    daily_expenses, investments, cushion, dream
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    created_at,
                    draft.source,
                    draft.total_amount,
                    draft.daily_expenses,
                    draft.investments,
                    draft.cushion,
                    draft.dream,
                ],
            )
            .map_err(|e| SplitterError::Storage(format!("Failed to insert income: {}", e)))?;

        Ok(RecordId::new(self.conn.last_insert_rowid()))
    }

    /// Up to `limit` records, newest insertion first
    pub fn recent(&self, limit: usize) -> Result<Vec<IncomeRecord>, SplitterError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, source, total_amount,
                    daily_expenses, investments, cushion, dream
             FROM incomes
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Column sums over every record; zeros for an empty ledger
    pub fn aggregate(&self) -> Result<LedgerTotals, SplitterError> {
        let totals = self.conn.query_row(
            "SELECT
                COALESCE(SUM(total_amount), 0.0),
                COALESCE(SUM(daily_expenses), 0.0),
                COALESCE(SUM(investments), 0.0),
                COALESCE(SUM(cushion), 0.0),
                COALESCE(SUM(dream), 0.0)
             FROM incomes",
            [],
            |row| {
                Ok(LedgerTotals {
                    total_amount: row.get(0)?,
                    daily_expenses: row.get(1)?,
                    investments: row.get(2)?,
                    cushion: row.get(3)?,
                    dream: row.get(4)?,
                })
            },
        )?;
        Ok(totals)
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, SplitterError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM incomes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<IncomeRecord> {
    let created_at: String = row.get(1)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(IncomeRecord {
        id: RecordId::new(row.get(0)?),
        created_at,
        source: row.get(2)?,
        total_amount: row.get(3)?,
        daily_expenses: row.get(4)?,
        investments: row.get(5)?,
        cushion: row.get(6)?,
        dream: row.get(7)?,
    })
}
