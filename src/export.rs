use chrono::NaiveDate;
use std::io;
use thiserror::Error;

use crate::models::ContractRecord;
use crate::utils::parse_date_dayfirst;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Write the whole record set as a CSV snapshot: one header row in
/// store order, then one row per record.
pub fn write_csv<W: io::Write>(records: &[ContractRecord], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ContractRecord::HEADERS)?;
    for record in records {
        wtr.write_record(record.values())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read records from a CSV snapshot, mapping columns by header.
/// Date columns are re-coerced through the day-first parser to ISO
/// text, the contract status is fabricated from the end date (earlier
/// than `today` means Expired, otherwise Active; an unparseable end
/// date leaves the imported status alone), and derived fields are
/// recomputed. Unknown columns are ignored, missing ones stay empty.
pub fn read_csv<R: io::Read>(
    reader: R,
    today: NaiveDate,
) -> Result<Vec<ContractRecord>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = ContractRecord::default();
        for (header, value) in headers.iter().zip(row.iter()) {
            record.set_by_header(header, value.to_string());
        }

        if let Some(start) = parse_date_dayfirst(&record.start_date) {
            record.start_date = start.format("%Y-%m-%d").to_string();
        }
        if let Some(end) = parse_date_dayfirst(&record.end_date) {
            record.end_date = end.format("%Y-%m-%d").to_string();
            record.contract_status = if end < today { "Expired" } else { "Active" }.to_string();
        }
        record.recompute_derived(today);

        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn sample_record() -> ContractRecord {
        let mut record = ContractRecord::blank("1");
        record.client_name = "Acme".to_string();
        record.location = "Main St, corner plot".to_string();
        record.rent_amount = "1500".to_string();
        record.advance_received = "500".to_string();
        record.end_date = "2025-06-22".to_string();
        record.payment_status = "Partial".to_string();
        record
    }

    #[test]
    fn snapshot_starts_with_the_header_row() {
        let mut out = Vec::new();
        write_csv(&[sample_record()], &mut out).expect("Failed to write CSV");

        let text = String::from_utf8(out).expect("Invalid UTF-8");
        let first_line = text.lines().next().expect("Empty output");
        assert!(first_line.starts_with("S No.,Billboard ID,"));
        assert!(first_line.ends_with("Partner's Share"));
    }

    #[test]
    fn snapshot_quotes_fields_with_commas() {
        let mut out = Vec::new();
        write_csv(&[sample_record()], &mut out).expect("Failed to write CSV");

        let text = String::from_utf8(out).expect("Invalid UTF-8");
        assert!(text.contains("\"Main St, corner plot\""));
    }

    #[test]
    fn round_trip_preserves_authoritative_fields() {
        let record = sample_record();
        let mut out = Vec::new();
        write_csv(&[record.clone()], &mut out).expect("Failed to write CSV");

        let imported = read_csv(out.as_slice(), today()).expect("Failed to read CSV");
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].serial_no, record.serial_no);
        assert_eq!(imported[0].client_name, record.client_name);
        assert_eq!(imported[0].rent_amount, record.rent_amount);
        assert_eq!(imported[0].payment_status, record.payment_status);
    }

    #[test]
    fn import_fabricates_status_from_the_end_date() {
        let csv_text = "\
S No.,Client Name,Contract End Date,Contract Status
1,Acme,14/06/2025,Pending
2,Globex,22/06/2025,Pending
3,Initech,,Pending
";
        let imported = read_csv(csv_text.as_bytes(), today()).expect("Failed to read CSV");

        assert_eq!(imported[0].contract_status, "Expired");
        assert_eq!(imported[1].contract_status, "Active");
        // No parseable end date: imported status survives.
        assert_eq!(imported[2].contract_status, "Pending");
    }

    #[test]
    fn import_coerces_dates_to_iso() {
        let csv_text = "\
S No.,Contract Start Date,Contract End Date
1,01/02/2025,22/06/2025
";
        let imported = read_csv(csv_text.as_bytes(), today()).expect("Failed to read CSV");
        assert_eq!(imported[0].start_date, "2025-02-01");
        assert_eq!(imported[0].end_date, "2025-06-22");
    }

    #[test]
    fn import_recomputes_derived_fields() {
        let csv_text = "\
S No.,Rent Amount,Advance Received,Balance / Credit,Contract End Date,Days Remaining
1,\"2,000\",500,999,22/06/2025,999
";
        let imported = read_csv(csv_text.as_bytes(), today()).expect("Failed to read CSV");
        assert_eq!(imported[0].balance, "1500.00");
        assert_eq!(imported[0].days_remaining, "7");
    }

    #[test]
    fn import_ignores_unknown_columns() {
        let csv_text = "\
S No.,Client Name,Mystery Column
5,Acme,whatever
";
        let imported = read_csv(csv_text.as_bytes(), today()).expect("Failed to read CSV");
        assert_eq!(imported[0].serial_no, "5");
        assert_eq!(imported[0].client_name, "Acme");
    }
}
