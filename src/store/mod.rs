pub mod memory;
pub mod storage_port;
pub mod stores;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dotenv::dotenv;

use crate::domain::contact::Contact;
use crate::errors::AppError;

/// Whole-state persistence: load everything at startup, overwrite
/// everything after each mutation. Last writer wins.
pub trait ContactStore {
    fn load(&self) -> Result<BTreeMap<String, Contact>, AppError>;

    fn save(&self, contacts: &BTreeMap<String, Contact>) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug)]
pub enum StorageMediums {
    Txt,
    Json,
}

impl StorageMediums {
    pub fn is_json(&self) -> bool {
        matches!(self, StorageMediums::Json)
    }

    pub fn is_txt(&self) -> bool {
        matches!(self, StorageMediums::Txt)
    }

    pub fn is_which(&self) -> &str {
        if self.is_json() { "json" } else { "txt" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str {
            "json" => Ok(StorageMediums::Json),
            "txt" => Ok(StorageMediums::Txt),
            _ => Err(AppError::Validation(
                "Not a recognized storage medium".to_string(),
            )),
        }
    }
}

pub fn parse_storage_type(
    storage_medium: Option<StorageMediums>,
) -> Result<Box<dyn ContactStore>, AppError> {
    let medium: StorageMediums;
    if let Some(storage_medium) = storage_medium {
        medium = storage_medium;
    } else {
        dotenv().ok();

        let choice = std::env::var("STORAGE_CHOICE").unwrap_or("json".to_string());
        medium = StorageMediums::from(&choice)?;
    }

    match medium {
        StorageMediums::Json => Ok(Box::new(stores::JsonStorage::new()?)),
        StorageMediums::Txt => Ok(Box::new(stores::TxtStorage::new()?)),
    }
}

pub fn create_file_parent(path: impl AsRef<Path>) -> Result<(), AppError> {
    if let Some(parent) = path.as_ref().parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Replace `path` wholesale: write a sibling temp file, then rename it
/// over the target so a crash mid-write cannot leave a truncated store.
pub fn replace_file(path: &str, data: &[u8]) -> Result<(), AppError> {
    create_file_parent(path)?;

    let tmp = format!("{path}.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
