use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A contact record. The name is not a field here: it keys the store map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Phone label (lowercase) to number (digits only).
    #[serde(default)]
    pub phones: BTreeMap<String, String>,

    /// Empty string means no email on record.
    #[serde(default)]
    pub email: String,
}

pub struct ValidationReq;

impl ValidationReq {
    pub fn name_req() -> String {
        "Name cannot be empty".to_string()
    }

    pub fn phone_req() -> String {
        "Phone number must contain digits only".to_string()
    }

    pub fn email_req() -> String {
        "Email can be empty, or must contain an '@'".to_string()
    }
}

impl Contact {
    pub fn new(phones: BTreeMap<String, String>, email: String) -> Self {
        Contact { phones, email }
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    /// "label: number, label: number" in label order, for listings.
    pub fn phone_summary(&self) -> String {
        self.phones
            .iter()
            .map(|(label, number)| format!("{label}: {number}"))
            .collect::<Vec<String>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_summary_joins_labels_in_order() {
        let mut phones = BTreeMap::new();
        phones.insert("work".to_string(), "5550000".to_string());
        phones.insert("home".to_string(), "5551234".to_string());

        let contact = Contact::new(phones, "".to_string());

        assert_eq!(contact.phone_summary(), "home: 5551234, work: 5550000");
    }

    #[test]
    fn empty_email_means_absent() {
        let contact = Contact::new(BTreeMap::new(), "".to_string());
        assert!(!contact.has_email());

        let contact = Contact::new(BTreeMap::new(), "a@b.com".to_string());
        assert!(contact.has_email());
    }
}
