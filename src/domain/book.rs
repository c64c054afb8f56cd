use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::contact::{Contact, ValidationReq};
use crate::errors::AppError;
use crate::store::{ContactStore, parse_storage_type};
use crate::validation::{normalize_label, validate_email, validate_name, validate_number};

/// A single edit applied by [`Phonebook::update`].
#[derive(Debug)]
pub enum ContactEdit {
    /// Insert a new label/number pair (overwrites the label if it exists).
    AddPhone { label: String, number: String },
    /// Change the number behind an existing label.
    SetPhone { label: String, number: String },
    /// Drop a label and its number.
    RemovePhone { label: String },
    /// Replace the email on record.
    ReplaceEmail { email: String },
}

/// Outcome of an update: edits that were rejected (the rest still applied)
/// and whether the contact was left without any phone number.
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub rejected: Vec<AppError>,
    pub no_phones_left: bool,
}

/// The contact store. Owns the name-to-contact map and writes the whole
/// map back through its storage backend after every mutation.
pub struct Phonebook {
    pub mem: BTreeMap<String, Contact>,
    pub storage: Box<dyn ContactStore>,
}

impl Phonebook {
    pub fn new() -> Result<Self, AppError> {
        Self::with_storage(parse_storage_type(None)?)
    }

    pub fn with_storage(storage: Box<dyn ContactStore>) -> Result<Self, AppError> {
        let mem = storage.load()?;
        info!(
            count = mem.len(),
            medium = storage.get_medium(),
            "contact store loaded"
        );
        Ok(Self { mem, storage })
    }

    /// Phone pairs are validated at the point of entry; this checks the
    /// name and email rules, inserts, and persists. A bad email aborts
    /// the whole add even though phones were already collected.
    pub fn add_contact(
        &mut self,
        name: &str,
        phones: BTreeMap<String, String>,
        email: &str,
    ) -> Result<(), AppError> {
        if !validate_name(name) {
            return Err(AppError::Validation(ValidationReq::name_req()));
        }
        if self.mem.contains_key(name) {
            return Err(AppError::Validation(format!(
                "Contact '{name}' already exists"
            )));
        }
        if !validate_email(email) {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }

        self.mem
            .insert(name.to_string(), Contact::new(phones, email.to_string()));
        debug!(%name, "contact added");
        self.save()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    pub fn contact_list(&self) -> impl Iterator<Item = (&String, &Contact)> {
        self.mem.iter()
    }

    /// Exact, case-sensitive lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.mem.get(name)
    }

    /// Scans every contact and label; the same number may appear under
    /// several contacts and every match is yielded.
    pub fn find_by_phone<'a>(
        &'a self,
        number: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str, &'a Contact)> {
        self.mem.iter().flat_map(move |(name, contact)| {
            contact.phones.iter().filter_map(move |(label, num)| {
                (num.as_str() == number).then_some((name.as_str(), label.as_str(), contact))
            })
        })
    }

    /// Applies `edits` in sequence. A rejected phone edit is recorded in
    /// the report without aborting the rest; a rejected email replacement
    /// aborts only the email change. Persists afterwards.
    pub fn update(&mut self, name: &str, edits: Vec<ContactEdit>) -> Result<UpdateReport, AppError> {
        let contact = self
            .mem
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(format!("Contact '{name}'")))?;

        let mut report = UpdateReport::default();
        for edit in edits {
            if let Err(rejected) = apply_edit(contact, edit) {
                report.rejected.push(rejected);
            }
        }
        report.no_phones_left = contact.phones.is_empty();

        debug!(%name, rejected = report.rejected.len(), "contact updated");
        self.save()?;
        Ok(report)
    }

    pub fn delete_contact(&mut self, name: &str) -> Result<(), AppError> {
        if self.mem.remove(name).is_none() {
            return Err(AppError::NotFound(format!("Contact '{name}'")));
        }
        debug!(%name, "contact deleted");
        self.save()
    }

    /// Whole-map rewrite through the backend. A failure here surfaces as
    /// an I/O error; the in-memory mutation that triggered it stands.
    pub fn save(&self) -> Result<(), AppError> {
        self.storage.save(&self.mem)?;
        debug!(count = self.mem.len(), "contact store saved");
        Ok(())
    }
}

fn apply_edit(contact: &mut Contact, edit: ContactEdit) -> Result<(), AppError> {
    match edit {
        ContactEdit::AddPhone { label, number } => {
            if !validate_number(&number) {
                return Err(AppError::Validation(ValidationReq::phone_req()));
            }
            contact.phones.insert(normalize_label(&label), number);
        }
        ContactEdit::SetPhone { label, number } => {
            let label = normalize_label(&label);
            if !validate_number(&number) {
                return Err(AppError::Validation(ValidationReq::phone_req()));
            }
            match contact.phones.get_mut(&label) {
                Some(slot) => *slot = number,
                None => return Err(AppError::NotFound(format!("Label '{label}'"))),
            }
        }
        ContactEdit::RemovePhone { label } => {
            let label = normalize_label(&label);
            if contact.phones.remove(&label).is_none() {
                return Err(AppError::NotFound(format!("Label '{label}'")));
            }
        }
        ContactEdit::ReplaceEmail { email } => {
            if !validate_email(&email) {
                return Err(AppError::Validation(ValidationReq::email_req()));
            }
            contact.email = email;
        }
    }
    Ok(())
}
