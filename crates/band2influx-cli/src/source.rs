//! Source Reader
//!
//! Reads activity samples out of a Gadgetbridge SQLite export. The file is
//! opened read-only and never created.

use std::path::{Path, PathBuf};

use band2influx_common::datapoint::{COLUMN_TIMESTAMP, SAMPLE_COLUMNS, SAMPLE_TABLE};
use band2influx_common::Datapoint;
use clap::ValueEnum;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{CliError, Result};

/// Order in which samples are returned, by timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceOrder {
    /// Oldest first
    #[default]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    /// Newest first
    #[value(name = "desc", alias = "descending")]
    Descending,
}

impl SourceOrder {
    fn sql_keyword(self) -> &'static str {
        match self {
            SourceOrder::Ascending => "ASC",
            SourceOrder::Descending => "DESC",
        }
    }
}

/// Read-only handle on a Gadgetbridge database
pub struct SourceReader {
    conn: Connection,
    path: PathBuf,
    order: SourceOrder,
}

impl SourceReader {
    /// Open `path` read-only.
    ///
    /// # Errors
    ///
    /// [`CliError::SourceUnavailable`] if the file does not exist, cannot be
    /// opened, or is not a SQLite database.
    pub fn open(path: impl AsRef<Path>, order: SourceOrder) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(CliError::source_unavailable(display, "file does not exist"));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| CliError::source_unavailable(display.clone(), e))?;

        // SQLite only looks at the header on first use
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| CliError::source_unavailable(display, e))?;

        debug!(path = %path.display(), ?order, "Opened activity database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            order,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn order(&self) -> SourceOrder {
        self.order
    }

    fn query(&self) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {} {}",
            SAMPLE_COLUMNS.join(", "),
            SAMPLE_TABLE,
            COLUMN_TIMESTAMP,
            self.order.sql_keyword()
        )
    }

    /// Every sample in the table, in the reader's order.
    ///
    /// # Errors
    ///
    /// [`CliError::SourceQuery`] if the table or a column is missing or a
    /// value is not an integer.
    pub fn read_all(&self) -> Result<Vec<Datapoint>> {
        let mut stmt = self.conn.prepare(&self.query()).map_err(CliError::source_query)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Datapoint {
                    timestamp: row.get(0)?,
                    raw_intensity: row.get(1)?,
                    steps: row.get(2)?,
                    raw_kind: row.get(3)?,
                    heart_rate: row.get(4)?,
                })
            })
            .map_err(CliError::source_query)?;

        let datapoints = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(CliError::source_query)?;

        debug!(rows = datapoints.len(), "Read activity samples");
        Ok(datapoints)
    }
}
