use std::collections::BTreeMap;
use std::io::BufRead;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::validation::validate_number;

/// Text layout of one record: the name on the first line inside the
/// braces, then one "label: number" line per phone, then the email line
/// when there is one.
pub fn serialize_contacts(contacts: &BTreeMap<String, Contact>) -> String {
    let mut data = String::new();

    for (name, contact) in contacts {
        data.push_str("{\n");
        data.push_str(name);
        data.push('\n');

        for (label, number) in &contact.phones {
            data.push_str(&format!("{label}: {number}\n"));
        }

        if contact.has_email() {
            data.push_str(&contact.email);
            data.push('\n');
        }

        data.push_str("}\n");
    }
    data
}

pub fn deserialize_contacts_from_txt_buffer<R: BufRead>(
    buffer: R,
) -> Result<BTreeMap<String, Contact>, AppError> {
    let mut contacts = BTreeMap::new();
    let mut name: Option<String> = None;
    let mut current = Contact::default();

    for line in buffer.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "{" {
            // Start of a new contact record
            name = None;
            current = Contact::default();
        } else if line == "}" {
            // End of a contact record
            match name.take() {
                Some(name) => {
                    contacts.insert(name, std::mem::take(&mut current));
                }
                None => {
                    return Err(AppError::Validation(
                        "Contact record without a name in stored data".to_string(),
                    ));
                }
            }
        } else if name.is_none() {
            // First line of a record is always the name
            name = Some(line.to_string());
        } else if let Some((label, number)) = split_phone_line(line) {
            current.phones.insert(label.to_string(), number.to_string());
        } else {
            current.email = line.to_string();
        }
    }

    Ok(contacts)
}

fn split_phone_line(line: &str) -> Option<(&str, &str)> {
    let (label, number) = line.split_once(':')?;
    let number = number.trim();
    validate_number(number).then_some((label.trim(), number))
}
