use std::collections::BTreeMap;
use std::path::PathBuf;

use csv::Reader;
use tracing::debug;

use super::CsvRow;
use crate::domain::book::Phonebook;
use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::validation::{normalize_label, validate_email, validate_name, validate_number};

const IMPORT_PATH: &str = "./import_export/contacts.csv";

/// Rows are grouped back into contacts by name. Rows that break the
/// store's validation rules are skipped rather than failing the whole
/// import; names already present in the book are left untouched.
pub fn import_contacts_from_csv(
    book: &mut Phonebook,
    src: Option<&str>,
) -> Result<(PathBuf, u64), AppError> {
    let file_path = PathBuf::from(src.unwrap_or(IMPORT_PATH));

    if !file_path.exists() {
        return Err(AppError::NotFound("CSV file".to_string()));
    }

    if file_path.extension().is_some_and(|ext| ext != "csv") {
        return Err(AppError::Validation("File not .csv".to_string()));
    }

    let mut reader = Reader::from_path(&file_path)?;
    let mut imported: BTreeMap<String, Contact> = BTreeMap::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;

        if !validate_name(&row.name) || !validate_email(&row.email) {
            continue;
        }

        let entry = imported.entry(row.name).or_default();
        if entry.email.is_empty() {
            entry.email = row.email;
        }

        // A blank label/number pair is the marker for a phone-less contact
        if row.label.is_empty() && row.number.is_empty() {
            continue;
        }
        if !validate_number(&row.number) {
            continue;
        }

        entry.phones.insert(normalize_label(&row.label), row.number);
    }

    let mut counter: u64 = 0;
    for (name, contact) in imported {
        if book.find_by_name(&name).is_some() {
            continue;
        }
        book.mem.insert(name, contact);
        counter += 1;
    }

    book.save()?;

    debug!(path = %file_path.display(), count = counter, "contacts imported");
    Ok((file_path, counter))
}
