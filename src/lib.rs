pub mod cli;
pub mod config;
pub mod database;
pub mod derived;
pub mod export;
pub mod filter;
pub mod images;
pub mod models;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use filter::RecordFilter;
pub use models::{ArchiveRecord, ContractRecord, RecordEdits};
pub use utils::Profile;
