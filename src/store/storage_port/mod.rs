pub mod export_csv;
pub mod import_csv;

use serde::{Deserialize, Serialize};

pub use export_csv::export_contacts_to_csv;
pub use import_csv::import_contacts_from_csv;

/// One CSV row per phone label; a contact with several numbers spans
/// several rows, and a contact with none gets a single row with empty
/// label and number so its name and email survive the trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvRow {
    pub name: String,
    pub label: String,
    pub number: String,
    pub email: String,
}
