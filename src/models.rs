use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::derived;

/// Selectable payment statuses. The store is plain text, so unknown
/// values still round-trip; these are the options offered for editing
/// and exact-match filtering.
pub const PAYMENT_OPTIONS: [&str; 3] = ["Paid", "Unpaid", "Partial"];

/// Selectable contract statuses.
pub const CONTRACT_OPTIONS: [&str; 3] = ["Active", "Expired", "Pending"];

/// Number of persisted fields on a contract record.
pub const FIELD_COUNT: usize = 20;

/// One billboard rental line item. Every field is stored as text;
/// `serial_no` is the business key and the only field user actions
/// never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub serial_no: String,
    pub billboard_id: String,
    pub location: String,
    pub size: String,
    pub client_name: String,
    pub company_name: String,
    pub contact_number: String,
    pub email: String,
    pub start_date: String,
    pub end_date: String,
    pub rental_duration: String,
    pub rent_amount: String,
    pub advance_received: String,
    pub balance: String,
    pub payment_status: String,
    pub contract_status: String,
    pub days_remaining: String,
    pub remarks: String,
    pub image_path: String,
    pub partner_share: String,
}

impl ContractRecord {
    /// Column headers in store/export order. `values()` and
    /// `set_by_header()` follow the same order.
    pub const HEADERS: [&'static str; FIELD_COUNT] = [
        "S No.",
        "Billboard ID",
        "Location / Address",
        "Billboard Size",
        "Client Name",
        "Company Name",
        "Contact Number",
        "Email",
        "Contract Start Date",
        "Contract End Date",
        "Rental Duration",
        "Rent Amount",
        "Advance Received",
        "Balance / Credit",
        "Payment Status",
        "Contract Status",
        "Days Remaining",
        "Remarks / Notes",
        "Billboard Image / Link",
        "Partner's Share",
    ];

    /// Create a record with the given serial number and every other
    /// field empty.
    pub fn blank(serial_no: impl Into<String>) -> Self {
        Self {
            serial_no: serial_no.into(),
            ..Self::default()
        }
    }

    /// Field values in the same order as `HEADERS`.
    pub fn values(&self) -> [&str; FIELD_COUNT] {
        [
            &self.serial_no,
            &self.billboard_id,
            &self.location,
            &self.size,
            &self.client_name,
            &self.company_name,
            &self.contact_number,
            &self.email,
            &self.start_date,
            &self.end_date,
            &self.rental_duration,
            &self.rent_amount,
            &self.advance_received,
            &self.balance,
            &self.payment_status,
            &self.contract_status,
            &self.days_remaining,
            &self.remarks,
            &self.image_path,
            &self.partner_share,
        ]
    }

    /// Set a field by its export header. Unknown headers are ignored
    /// so imports can carry extra columns.
    pub fn set_by_header(&mut self, header: &str, value: String) {
        match header {
            "S No." => self.serial_no = value,
            "Billboard ID" => self.billboard_id = value,
            "Location / Address" => self.location = value,
            "Billboard Size" => self.size = value,
            "Client Name" => self.client_name = value,
            "Company Name" => self.company_name = value,
            "Contact Number" => self.contact_number = value,
            "Email" => self.email = value,
            "Contract Start Date" => self.start_date = value,
            "Contract End Date" => self.end_date = value,
            "Rental Duration" => self.rental_duration = value,
            "Rent Amount" => self.rent_amount = value,
            "Advance Received" => self.advance_received = value,
            "Balance / Credit" => self.balance = value,
            "Payment Status" => self.payment_status = value,
            "Contract Status" => self.contract_status = value,
            "Days Remaining" => self.days_remaining = value,
            "Remarks / Notes" => self.remarks = value,
            "Billboard Image / Link" => self.image_path = value,
            "Partner's Share" => self.partner_share = value,
            _ => {}
        }
    }

    /// Recompute the non-authoritative fields from their inputs.
    /// Balance comes from the current rent/advance text, days
    /// remaining from the current end date relative to `today`.
    /// An unparseable end date leaves days remaining empty.
    pub fn recompute_derived(&mut self, today: NaiveDate) {
        let rent = derived::to_amount(&self.rent_amount);
        let advance = derived::to_amount(&self.advance_received);
        self.balance = format!("{:.2}", derived::balance(rent, advance));
        self.days_remaining = derived::days_remaining_on(&self.end_date, today)
            .map(|days| days.to_string())
            .unwrap_or_default();
    }
}

/// One edit submission for a single record, addressed by serial
/// number. Only the fields the user actually touched are set; derived
/// fields are never part of the payload, they are recomputed after
/// the edits are applied. `rental_duration` keeps its stored value.
#[derive(Debug, Clone, Default)]
pub struct RecordEdits {
    pub billboard_id: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub client_name: Option<String>,
    pub company_name: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rent_amount: Option<String>,
    pub advance_received: Option<String>,
    pub payment_status: Option<String>,
    pub contract_status: Option<String>,
    pub remarks: Option<String>,
    pub partner_share: Option<String>,
}

impl RecordEdits {
    /// True if no field was touched.
    pub fn is_empty(&self) -> bool {
        self.billboard_id.is_none()
            && self.location.is_none()
            && self.size.is_none()
            && self.client_name.is_none()
            && self.company_name.is_none()
            && self.contact_number.is_none()
            && self.email.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.rent_amount.is_none()
            && self.advance_received.is_none()
            && self.payment_status.is_none()
            && self.contract_status.is_none()
            && self.remarks.is_none()
            && self.partner_share.is_none()
    }

    /// Overwrite the touched fields on `record`.
    pub fn apply_to(&self, record: &mut ContractRecord) {
        if let Some(v) = &self.billboard_id {
            record.billboard_id = v.clone();
        }
        if let Some(v) = &self.location {
            record.location = v.clone();
        }
        if let Some(v) = &self.size {
            record.size = v.clone();
        }
        if let Some(v) = &self.client_name {
            record.client_name = v.clone();
        }
        if let Some(v) = &self.company_name {
            record.company_name = v.clone();
        }
        if let Some(v) = &self.contact_number {
            record.contact_number = v.clone();
        }
        if let Some(v) = &self.email {
            record.email = v.clone();
        }
        if let Some(v) = &self.start_date {
            record.start_date = v.clone();
        }
        if let Some(v) = &self.end_date {
            record.end_date = v.clone();
        }
        if let Some(v) = &self.rent_amount {
            record.rent_amount = v.clone();
        }
        if let Some(v) = &self.advance_received {
            record.advance_received = v.clone();
        }
        if let Some(v) = &self.payment_status {
            record.payment_status = v.clone();
        }
        if let Some(v) = &self.contract_status {
            record.contract_status = v.clone();
        }
        if let Some(v) = &self.remarks {
            record.remarks = v.clone();
        }
        if let Some(v) = &self.partner_share {
            record.partner_share = v.clone();
        }
    }
}

/// A contract record moved out of the live table, with the moment it
/// was archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub record: ContractRecord,
    pub archived_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn blank_record_has_only_the_serial() {
        let record = ContractRecord::blank("7");
        assert_eq!(record.serial_no, "7");
        for value in &record.values()[1..] {
            assert!(value.is_empty());
        }
    }

    #[test]
    fn headers_and_values_line_up() {
        let mut record = ContractRecord::blank("1");
        for (i, header) in ContractRecord::HEADERS.iter().enumerate() {
            record.set_by_header(header, format!("v{i}"));
        }
        assert_eq!(record.serial_no, "v0");
        for (i, value) in record.values().iter().enumerate() {
            assert_eq!(*value, format!("v{i}"));
        }
    }

    #[test]
    fn edits_apply_only_touched_fields() {
        let mut record = ContractRecord::blank("3");
        record.client_name = "Acme".to_string();
        record.remarks = "keep me".to_string();

        let edits = RecordEdits {
            client_name: Some("Globex".to_string()),
            rent_amount: Some("1200".to_string()),
            ..RecordEdits::default()
        };
        edits.apply_to(&mut record);

        assert_eq!(record.client_name, "Globex");
        assert_eq!(record.rent_amount, "1200");
        assert_eq!(record.remarks, "keep me");
    }

    #[test]
    fn recompute_fills_balance_and_days_remaining() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut record = ContractRecord::blank("1");
        record.rent_amount = "1,500".to_string();
        record.advance_received = "400.5".to_string();
        record.end_date = "17/01/2025".to_string();
        record.recompute_derived(today);

        assert_eq!(record.balance, "1099.50");
        assert_eq!(record.days_remaining, "7");
    }

    #[test]
    fn recompute_leaves_days_remaining_empty_without_end_date() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut record = ContractRecord::blank("1");
        record.recompute_derived(today);

        assert_eq!(record.balance, "0.00");
        assert_eq!(record.days_remaining, "");
    }
}
