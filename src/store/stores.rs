use std::collections::BTreeMap;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{BufReader, Read};
use std::path::Path;

use super::{ContactStore, replace_file};
use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::helper;

pub struct JsonStorage {
    pub medium: String,
    pub path: String,
}

impl JsonStorage {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            medium: "json".to_string(),
            path: env::var("JSON_STORAGE_PATH").unwrap_or("./.instance/contacts.json".to_string()),
        })
    }
}

pub struct TxtStorage {
    pub medium: String,
    pub path: String,
}

impl TxtStorage {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            medium: "txt".to_string(),
            path: env::var("TXT_STORAGE_PATH").unwrap_or("./.instance/contacts.txt".to_string()),
        })
    }
}

impl ContactStore for JsonStorage {
    fn load(&self) -> Result<BTreeMap<String, Contact>, AppError> {
        if !fs::exists(Path::new(&self.path))? {
            return Ok(BTreeMap::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, contacts: &BTreeMap<String, Contact>) -> Result<(), AppError> {
        let json_contacts = serde_json::to_string_pretty(contacts)?;
        replace_file(&self.path, json_contacts.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}

impl ContactStore for TxtStorage {
    fn load(&self) -> Result<BTreeMap<String, Contact>, AppError> {
        if !fs::exists(Path::new(&self.path))? {
            return Ok(BTreeMap::new());
        }

        let file = OpenOptions::new().read(true).open(&self.path)?;
        let reader = BufReader::new(file);
        let contacts = helper::deserialize_contacts_from_txt_buffer(reader)?;
        Ok(contacts)
    }

    fn save(&self, contacts: &BTreeMap<String, Contact>) -> Result<(), AppError> {
        let data = helper::serialize_contacts(contacts);
        replace_file(&self.path, data.as_bytes())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contacts() -> BTreeMap<String, Contact> {
        let mut contacts = BTreeMap::new();

        let mut phones = BTreeMap::new();
        phones.insert("mobile".to_string(), "5551234".to_string());
        phones.insert("home".to_string(), "5550000".to_string());
        contacts.insert(
            "Uche".to_string(),
            Contact::new(phones, "ucheuche@gmail.com".to_string()),
        );

        let mut phones = BTreeMap::new();
        phones.insert("work".to_string(), "01234567890".to_string());
        contacts.insert("Alex".to_string(), Contact::new(phones, "".to_string()));

        contacts
    }

    fn temp_path(name: &str, ext: &str) -> String {
        std::env::temp_dir()
            .join(format!("rusty_phonebook_{name}_{}.{ext}", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn json_store_round_trips() -> Result<(), AppError> {
        let storage = JsonStorage {
            medium: "json".to_string(),
            path: temp_path("json_roundtrip", "json"),
        };

        let contacts = sample_contacts();
        storage.save(&contacts)?;
        let loaded = storage.load()?;

        assert_eq!(loaded, contacts);

        fs::remove_file(&storage.path)?;
        Ok(())
    }

    #[test]
    fn txt_store_round_trips() -> Result<(), AppError> {
        let storage = TxtStorage {
            medium: "txt".to_string(),
            path: temp_path("txt_roundtrip", "txt"),
        };

        let contacts = sample_contacts();
        storage.save(&contacts)?;
        let loaded = storage.load()?;

        assert_eq!(loaded, contacts);

        fs::remove_file(&storage.path)?;
        Ok(())
    }

    #[test]
    fn missing_file_loads_as_empty_store() -> Result<(), AppError> {
        let storage = JsonStorage {
            medium: "json".to_string(),
            path: temp_path("json_missing", "json"),
        };

        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn corrupt_json_is_a_fatal_load_error() -> Result<(), AppError> {
        let storage = JsonStorage {
            medium: "json".to_string(),
            path: temp_path("json_corrupt", "json"),
        };

        fs::write(&storage.path, b"{ not json at all")?;
        let err = storage.load().unwrap_err();
        assert!(matches!(err, AppError::Serde(_)));

        fs::remove_file(&storage.path)?;
        Ok(())
    }

    #[test]
    fn save_replaces_previous_contents_wholesale() -> Result<(), AppError> {
        let storage = JsonStorage {
            medium: "json".to_string(),
            path: temp_path("json_replace", "json"),
        };

        storage.save(&sample_contacts())?;

        let mut smaller = BTreeMap::new();
        smaller.insert("Only".to_string(), Contact::default());
        storage.save(&smaller)?;

        let loaded = storage.load()?;
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("Only"));

        fs::remove_file(&storage.path)?;
        Ok(())
    }
}
