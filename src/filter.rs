use crate::models::ContractRecord;

/// Status selection meaning "no constraint".
pub const ALL: &str = "All";

/// The visible-subset query: global substring search, a client-name
/// substring filter, and exact-match status filters. Active clauses
/// combine with AND; evaluation never touches the store.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub client_contains: Option<String>,
    pub payment_status: Option<String>,
    pub contract_status: Option<String>,
}

impl RecordFilter {
    /// True when no clause constrains anything.
    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.client_contains).is_none()
            && active_status(&self.payment_status).is_none()
            && active_status(&self.contract_status).is_none()
    }

    /// Whether a record belongs to the visible subset.
    pub fn matches(&self, record: &ContractRecord) -> bool {
        if let Some(query) = active(&self.search) {
            let query = query.to_lowercase();
            let hit = record
                .values()
                .iter()
                .any(|value| value.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if let Some(query) = active(&self.client_contains) {
            if !record
                .client_name
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }

        if let Some(status) = active_status(&self.payment_status) {
            if record.payment_status != status {
                return false;
            }
        }

        if let Some(status) = active_status(&self.contract_status) {
            if record.contract_status != status {
                return false;
            }
        }

        true
    }

    /// Narrow a loaded record set to the visible subset.
    pub fn apply(&self, records: &[ContractRecord]) -> Vec<ContractRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn active(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}

fn active_status(selection: &Option<String>) -> Option<&str> {
    active(selection).filter(|s| *s != ALL)
}
