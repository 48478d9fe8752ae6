use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ArchiveRecord, ContractRecord};
use crate::utils::get_current_timestamp_string;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("No record with serial number {0}")]
    RecordNotFound(String),
}

/// Store columns in persisted order, matching
/// `ContractRecord::values()`.
const COLUMNS: [&str; 20] = [
    "serial_no",
    "billboard_id",
    "location",
    "size",
    "client_name",
    "company_name",
    "contact_number",
    "email",
    "start_date",
    "end_date",
    "rental_duration",
    "rent_amount",
    "advance_received",
    "balance",
    "payment_status",
    "contract_status",
    "days_remaining",
    "remarks",
    "image_path",
    "partner_share",
];

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection, initialize the schema, and
    /// seed the live table with `seed_rows` blank numbered records if
    /// it is empty.
    pub fn new(path: &str, seed_rows: u32) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        // Open or create the database
        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;
        db.seed_if_empty(seed_rows)?;

        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        // Everything is TEXT; numeric and date coercion is the
        // calculator's job, not the store's.
        let cols_sql = COLUMNS
            .iter()
            .map(|c| format!("{c} TEXT NOT NULL DEFAULT ''"))
            .collect::<Vec<_>>()
            .join(", ");

        self.conn.execute(
            &format!("CREATE TABLE IF NOT EXISTS billboards ({cols_sql})"),
            [],
        )?;

        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS billboards_archive ({cols_sql}, archived_at TEXT NOT NULL DEFAULT '')"
            ),
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_billboards_serial_no ON billboards(serial_no)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_billboards_client_name ON billboards(client_name)",
            [],
        )?;

        self.backfill_missing_columns()?;

        Ok(())
    }

    /// Add any schema column missing from an existing database file,
    /// defaulting to the empty value, so `load_all` always returns
    /// every field.
    fn backfill_missing_columns(&self) -> Result<(), DatabaseError> {
        // Helper to check if a column exists
        fn column_exists(
            conn: &Connection,
            table: &str,
            column: &str,
        ) -> Result<bool, DatabaseError> {
            let mut stmt =
                conn.prepare("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")?;
            let count: i64 = stmt.query_row(rusqlite::params![table, column], |row| row.get(0))?;
            Ok(count > 0)
        }

        for table in ["billboards", "billboards_archive"] {
            for column in COLUMNS {
                if !column_exists(&self.conn, table, column)? {
                    self.conn.execute(
                        &format!("ALTER TABLE {table} ADD COLUMN {column} TEXT NOT NULL DEFAULT ''"),
                        [],
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Seed the live table with blank records numbered 1..=seed_rows.
    /// Only runs when the table is empty, so an existing store is
    /// never touched.
    fn seed_if_empty(&self, seed_rows: u32) -> Result<(), DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM billboards", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.unchecked_transaction()?;
        for serial in 1..=seed_rows {
            tx.execute(
                "INSERT INTO billboards (serial_no) VALUES (?1)",
                rusqlite::params![serial.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Helper function to map a row to a ContractRecord
    fn row_to_record(row: &rusqlite::Row) -> Result<ContractRecord, rusqlite::Error> {
        Ok(ContractRecord {
            serial_no: row.get(0)?,
            billboard_id: row.get(1)?,
            location: row.get(2)?,
            size: row.get(3)?,
            client_name: row.get(4)?,
            company_name: row.get(5)?,
            contact_number: row.get(6)?,
            email: row.get(7)?,
            start_date: row.get(8)?,
            end_date: row.get(9)?,
            rental_duration: row.get(10)?,
            rent_amount: row.get(11)?,
            advance_received: row.get(12)?,
            balance: row.get(13)?,
            payment_status: row.get(14)?,
            contract_status: row.get(15)?,
            days_remaining: row.get(16)?,
            remarks: row.get(17)?,
            image_path: row.get(18)?,
            partner_share: row.get(19)?,
        })
    }

    /// Get all records in persisted (rowid) order
    pub fn load_all(&self) -> Result<Vec<ContractRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM billboards ORDER BY rowid ASC",
            COLUMNS.join(", ")
        ))?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Number of live records
    pub fn count(&self) -> Result<i64, DatabaseError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM billboards", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get a single record by serial number. If several rows share a
    /// serial, the first persisted one wins.
    pub fn get(&self, serial_no: &str) -> Result<Option<ContractRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM billboards WHERE serial_no = ?1 ORDER BY rowid ASC LIMIT 1",
            COLUMNS.join(", ")
        ))?;

        match stmt.query_row(rusqlite::params![serial_no], Self::row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Find the rowid holding a serial number, if any (first match).
    fn find_rowid(&self, serial_no: &str) -> Result<Option<i64>, DatabaseError> {
        match self.conn.query_row(
            "SELECT rowid FROM billboards WHERE serial_no = ?1 ORDER BY rowid ASC LIMIT 1",
            rusqlite::params![serial_no],
            |row| row.get(0),
        ) {
            Ok(rowid) => Ok(Some(rowid)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Keyed write: overwrite every field of the row holding this
    /// serial number, or insert a new row when no match exists. The
    /// later of two writes to the same serial wins.
    pub fn upsert(&self, record: &ContractRecord) -> Result<(), DatabaseError> {
        let rowid = self.find_rowid(&record.serial_no)?;
        let values = record.values();

        let tx = self.conn.unchecked_transaction()?;
        if let Some(rowid) = rowid {
            let set_sql = COLUMNS
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{c} = ?{}", i + 1))
                .collect::<Vec<_>>()
                .join(", ");
            let mut params: Vec<&dyn rusqlite::ToSql> =
                values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            params.push(&rowid);
            tx.execute(
                &format!(
                    "UPDATE billboards SET {set_sql} WHERE rowid = ?{}",
                    COLUMNS.len() + 1
                ),
                params.as_slice(),
            )?;
        } else {
            let placeholders = (1..=COLUMNS.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            let params: Vec<&dyn rusqlite::ToSql> =
                values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            tx.execute(
                &format!(
                    "INSERT INTO billboards ({}) VALUES ({placeholders})",
                    COLUMNS.join(", ")
                ),
                params.as_slice(),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Move a record into the archive: append a copy with a timestamp,
    /// delete the live row, both in one transaction.
    pub fn archive(&self, serial_no: &str) -> Result<ArchiveRecord, DatabaseError> {
        let rowid = self
            .find_rowid(serial_no)?
            .ok_or_else(|| DatabaseError::RecordNotFound(serial_no.to_string()))?;
        let record = self
            .get(serial_no)?
            .ok_or_else(|| DatabaseError::RecordNotFound(serial_no.to_string()))?;
        let archived_at = get_current_timestamp_string();

        let placeholders = (1..=COLUMNS.len() + 1)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let values = record.values();
        let mut params: Vec<&dyn rusqlite::ToSql> =
            values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
        params.push(&archived_at);

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            &format!(
                "INSERT INTO billboards_archive ({}, archived_at) VALUES ({placeholders})",
                COLUMNS.join(", ")
            ),
            params.as_slice(),
        )?;
        tx.execute(
            "DELETE FROM billboards WHERE rowid = ?1",
            rusqlite::params![rowid],
        )?;
        tx.commit()?;

        Ok(ArchiveRecord {
            record,
            archived_at,
        })
    }

    /// Get all archived records in append order
    pub fn load_archive(&self) -> Result<Vec<ArchiveRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {}, archived_at FROM billboards_archive ORDER BY rowid ASC",
            COLUMNS.join(", ")
        ))?;
        let records = stmt
            .query_map([], |row| {
                Ok(ArchiveRecord {
                    record: Self::row_to_record(row)?,
                    archived_at: row.get(20)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Delete every archived record, returning how many were removed.
    /// Leaves the live table untouched.
    pub fn clear_archive(&self) -> Result<usize, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM billboards_archive", [])?;
        tx.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db(seed_rows: u32) -> Database {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
        let db = Database { conn };
        db.initialize_schema().expect("Failed to initialize schema");
        db.seed_if_empty(seed_rows).expect("Failed to seed");
        db
    }

    fn sample_record(serial: &str) -> ContractRecord {
        let mut record = ContractRecord::blank(serial);
        record.billboard_id = "BB-101".to_string();
        record.location = "Main St & 5th".to_string();
        record.size = "20x10".to_string();
        record.client_name = "Acme".to_string();
        record.company_name = "Acme Outdoor Ltd".to_string();
        record.contact_number = "0300-1234567".to_string();
        record.email = "ads@acme.example".to_string();
        record.start_date = "01/01/2025".to_string();
        record.end_date = "31/12/2025".to_string();
        record.rent_amount = "1500".to_string();
        record.advance_received = "500".to_string();
        record.balance = "1000.00".to_string();
        record.payment_status = "Partial".to_string();
        record.contract_status = "Active".to_string();
        record.remarks = "renewal due".to_string();
        record.partner_share = "50%".to_string();
        record
    }

    #[test]
    fn seeds_blank_numbered_rows_once() {
        let db = test_db(50);
        let records = db.load_all().expect("Failed to load");

        assert_eq!(records.len(), 50);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.serial_no, (i + 1).to_string());
            for value in &record.values()[1..] {
                assert!(value.is_empty());
            }
        }

        // Re-running the seed must not duplicate rows.
        db.seed_if_empty(50).expect("Failed to re-seed");
        assert_eq!(db.count().expect("Failed to count"), 50);
    }

    #[test]
    fn backfills_missing_columns_on_open() {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
        conn.execute(
            "CREATE TABLE billboards (serial_no TEXT NOT NULL DEFAULT '')",
            [],
        )
        .expect("Failed to create stripped table");

        let db = Database { conn };
        db.initialize_schema().expect("Failed to initialize schema");
        db.conn()
            .execute("INSERT INTO billboards (serial_no) VALUES ('1')", [])
            .expect("Failed to insert");

        let records = db.load_all().expect("Failed to load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].serial_no, "1");
        for value in &records[0].values()[1..] {
            assert!(value.is_empty());
        }
    }

    #[test]
    fn upsert_overwrites_the_matching_row() {
        let db = test_db(5);
        let record = sample_record("3");
        db.upsert(&record).expect("Failed to upsert");

        let records = db.load_all().expect("Failed to load");
        assert_eq!(records.len(), 5);
        assert_eq!(records[2], record);
    }

    #[test]
    fn upsert_is_idempotent() {
        let db = test_db(0);
        let record = sample_record("9");
        db.upsert(&record).expect("Failed to upsert");
        db.upsert(&record).expect("Failed to upsert again");

        let records = db.load_all().expect("Failed to load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
    }

    #[test]
    fn upsert_round_trips_every_field() {
        let db = test_db(0);
        let record = sample_record("12");
        db.upsert(&record).expect("Failed to upsert");

        let loaded = db
            .get("12")
            .expect("Failed to get")
            .expect("Record missing");
        assert_eq!(loaded, record);
    }

    #[test]
    fn upsert_falls_through_to_insert_for_unknown_serial() {
        let db = test_db(2);
        let record = sample_record("99");
        db.upsert(&record).expect("Failed to upsert");

        assert_eq!(db.count().expect("Failed to count"), 3);
        let loaded = db
            .get("99")
            .expect("Failed to get")
            .expect("Record missing");
        assert_eq!(loaded, record);
    }

    #[test]
    fn get_unknown_serial_is_none() {
        let db = test_db(3);
        assert!(db.get("42").expect("Failed to get").is_none());
    }

    #[test]
    fn archive_moves_the_row() {
        let db = test_db(3);
        let record = sample_record("2");
        db.upsert(&record).expect("Failed to upsert");

        let archived = db.archive("2").expect("Failed to archive");
        assert_eq!(archived.record, record);
        assert!(!archived.archived_at.is_empty());

        assert!(db.get("2").expect("Failed to get").is_none());
        assert_eq!(db.count().expect("Failed to count"), 2);

        let archive = db.load_archive().expect("Failed to load archive");
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].record, record);
    }

    #[test]
    fn archive_unknown_serial_is_an_error() {
        let db = test_db(1);
        let result = db.archive("404");
        assert!(matches!(result, Err(DatabaseError::RecordNotFound(_))));
    }

    #[test]
    fn clear_archive_leaves_live_rows_alone() {
        let db = test_db(4);
        db.upsert(&sample_record("1")).expect("Failed to upsert");
        db.archive("1").expect("Failed to archive");
        db.upsert(&sample_record("2")).expect("Failed to upsert");
        db.archive("2").expect("Failed to archive");

        let removed = db.clear_archive().expect("Failed to clear archive");
        assert_eq!(removed, 2);
        assert!(db.load_archive().expect("Failed to load archive").is_empty());
        assert_eq!(db.count().expect("Failed to count"), 2);
    }
}
