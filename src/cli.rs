use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;
use crate::database::{Database, DatabaseError};
use crate::export::{self, ExportError};
use crate::filter::RecordFilter;
use crate::images::{self, ImageError};
use crate::models::{CONTRACT_OPTIONS, ContractRecord, PAYMENT_OPTIONS, RecordEdits};

#[derive(Parser)]
#[command(name = "billboard")]
#[command(about = "Billboard rental contract tracker")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List records, optionally filtered
    List {
        /// Substring to search across every field (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Substring the client name must contain
        #[arg(long)]
        client: Option<String>,
        /// Payment status to match exactly (Paid/Unpaid/Partial, or All)
        #[arg(long)]
        payment: Option<String>,
        /// Contract status to match exactly (Active/Expired/Pending, or All)
        #[arg(long)]
        contract: Option<String>,
        /// Print the visible records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one record
    Show {
        /// Serial number of the record
        serial: String,
    },
    /// Edit fields of a record; an unseen serial number inserts a new row
    Edit {
        /// Serial number of the record
        serial: String,
        #[arg(long)]
        billboard_id: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        client_name: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        contact_number: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Contract start date (day-first or YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Contract end date (day-first or YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Rent amount; thousands separators are accepted
        #[arg(long)]
        rent: Option<String>,
        /// Advance received
        #[arg(long)]
        advance: Option<String>,
        #[arg(long)]
        payment_status: Option<String>,
        #[arg(long)]
        contract_status: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
        #[arg(long)]
        partner_share: Option<String>,
    },
    /// Attach a PNG/JPEG image to a record
    AttachImage {
        /// Serial number of the record
        serial: String,
        /// Path of the image file to store
        file: PathBuf,
    },
    /// Export the whole store to a CSV snapshot
    ExportCsv {
        /// Output file path
        output: PathBuf,
    },
    /// Import records from a CSV file, upserting by serial number
    ImportCsv {
        /// Input file path
        input: PathBuf,
    },
    /// Move a record out of the live table into the archive
    Archive {
        /// Serial number of the record
        serial: String,
    },
    /// List archived records
    ArchiveList,
    /// Delete every archived record
    ArchiveClear,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
    #[error("Image error: {0}")]
    ImageError(#[from] ImageError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Handle the list command
pub fn handle_list(
    search: Option<String>,
    client: Option<String>,
    payment: Option<String>,
    contract: Option<String>,
    json: bool,
    db: &Database,
) -> Result<(), CliError> {
    let records = db.load_all()?;
    let filter = RecordFilter {
        search,
        client_contains: client,
        payment_status: payment,
        contract_status: contract,
    };
    let visible = filter.apply(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!(
        "{:>6}  {:<12} {:<20} {:<12} {:<12} {:>10} {:>10} {:<8} {:<8}",
        "S No.",
        "Billboard",
        "Client",
        "Start",
        "End",
        "Rent",
        "Balance",
        "Payment",
        "Contract"
    );
    for record in &visible {
        println!(
            "{:>6}  {:<12} {:<20} {:<12} {:<12} {:>10} {:>10} {:<8} {:<8}",
            record.serial_no,
            record.billboard_id,
            record.client_name,
            record.start_date,
            record.end_date,
            record.rent_amount,
            record.balance,
            record.payment_status,
            record.contract_status
        );
    }
    println!("Showing {} of {} rows", visible.len(), records.len());

    Ok(())
}

/// Handle the show command
pub fn handle_show(serial: String, db: &Database) -> Result<(), CliError> {
    let record = db
        .get(&serial)?
        .ok_or(DatabaseError::RecordNotFound(serial))?;

    for (header, value) in ContractRecord::HEADERS.iter().zip(record.values()) {
        println!("{:<24} {}", header, value);
    }

    Ok(())
}

/// Handle the edit command: apply the touched fields to the stored
/// record (or a blank one for an unseen serial), recompute derived
/// fields, and write the full row back.
pub fn handle_edit(serial: String, edits: RecordEdits, db: &Database) -> Result<(), CliError> {
    if edits.is_empty() {
        println!("No fields given; record {} unchanged", serial);
        return Ok(());
    }

    // Statuses are free text in the store; unknown values only warn.
    if let Some(status) = &edits.payment_status {
        if !PAYMENT_OPTIONS.contains(&status.as_str()) {
            eprintln!("Warning: unusual payment status '{}'", status);
        }
    }
    if let Some(status) = &edits.contract_status {
        if !CONTRACT_OPTIONS.contains(&status.as_str()) {
            eprintln!("Warning: unusual contract status '{}'", status);
        }
    }

    let mut record = db
        .get(&serial)?
        .unwrap_or_else(|| ContractRecord::blank(serial.clone()));
    edits.apply_to(&mut record);
    record.recompute_derived(chrono::Local::now().date_naive());

    db.upsert(&record)?;
    println!(
        "Record {} saved (balance {}, days remaining {})",
        record.serial_no,
        record.balance,
        if record.days_remaining.is_empty() {
            "-"
        } else {
            record.days_remaining.as_str()
        }
    );

    Ok(())
}

/// Handle the attach-image command
pub fn handle_attach_image(
    serial: String,
    file: PathBuf,
    config: &Config,
    db: &Database,
) -> Result<(), CliError> {
    let stored_path = images::attach(&config.get_image_dir(), &serial, &file)?;

    let mut record = db
        .get(&serial)?
        .unwrap_or_else(|| ContractRecord::blank(serial.clone()));
    record.image_path = stored_path.clone();
    db.upsert(&record)?;

    println!("Image saved: {}", stored_path);
    Ok(())
}

/// Handle the export-csv command
pub fn handle_export_csv(output: PathBuf, db: &Database) -> Result<(), CliError> {
    let records = db.load_all()?;
    let file = File::create(&output)?;
    export::write_csv(&records, file)?;

    println!("Exported {} rows to {}", records.len(), output.display());
    Ok(())
}

/// Handle the import-csv command
pub fn handle_import_csv(input: PathBuf, db: &Database) -> Result<(), CliError> {
    let file = File::open(&input)?;
    let records = export::read_csv(file, chrono::Local::now().date_naive())?;

    for record in &records {
        db.upsert(record)?;
    }

    println!("Imported {} rows from {}", records.len(), input.display());
    Ok(())
}

/// Handle the archive command
pub fn handle_archive(serial: String, db: &Database) -> Result<(), CliError> {
    let archived = db.archive(&serial)?;
    println!(
        "Record {} moved to the archive at {}",
        archived.record.serial_no, archived.archived_at
    );
    Ok(())
}

/// Handle the archive-list command
pub fn handle_archive_list(db: &Database) -> Result<(), CliError> {
    let archive = db.load_archive()?;

    for entry in &archive {
        println!(
            "{:>6}  {:<20} archived {}",
            entry.record.serial_no, entry.record.client_name, entry.archived_at
        );
    }
    println!("{} archived records", archive.len());

    Ok(())
}

/// Handle the archive-clear command
pub fn handle_archive_clear(db: &Database) -> Result<(), CliError> {
    let removed = db.clear_archive()?;
    println!("Cleared {} archived records", removed);
    Ok(())
}
