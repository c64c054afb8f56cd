use std::collections::BTreeMap;
use std::path::PathBuf;

use csv::Writer;
use tracing::debug;

use super::CsvRow;
use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::store::create_file_parent;

const EXPORT_PATH: &str = "./import_export/exported.csv";

pub fn export_contacts_to_csv(
    contacts: &BTreeMap<String, Contact>,
    des: Option<&str>,
) -> Result<(PathBuf, u64), AppError> {
    let mut file_path = PathBuf::from(EXPORT_PATH);

    if let Some(path) = des {
        file_path = PathBuf::from(path);

        if file_path.is_dir() || file_path.extension().is_some_and(|ext| ext != "csv") {
            if file_path.is_dir() {
                file_path = file_path.join("exported.csv");
            } else {
                return Err(AppError::Validation(
                    "Export file must be a .csv file".to_string(),
                ));
            }
        }
    }

    create_file_parent(&file_path)?;

    let mut writer = Writer::from_path(&file_path)?;
    let mut counter: u64 = 0;

    for (name, contact) in contacts {
        if contact.phones.is_empty() {
            writer.serialize(CsvRow {
                name: name.clone(),
                label: String::new(),
                number: String::new(),
                email: contact.email.clone(),
            })?;
        }

        for (label, number) in &contact.phones {
            writer.serialize(CsvRow {
                name: name.clone(),
                label: label.clone(),
                number: number.clone(),
                email: contact.email.clone(),
            })?;
        }

        counter += 1;
    }

    writer.flush()?;

    debug!(path = %file_path.display(), count = counter, "contacts exported");
    Ok((file_path, counter))
}
