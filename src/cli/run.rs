use std::collections::BTreeMap;
use std::env;
use std::io;

use clap::Parser;

use crate::cli::{
    self,
    command::{Cli, Command},
};
use crate::domain::book::{ContactEdit, Phonebook};
use crate::domain::contact::ValidationReq;
use crate::errors::AppError;
use crate::store::storage_port::{export_contacts_to_csv, import_contacts_from_csv};
use crate::validation::{normalize_label, validate_name, validate_number};

pub fn run_app() -> Result<(), AppError> {
    let cli_args = Cli::parse();

    unsafe {
        env::set_var("STORAGE_CHOICE", &cli_args.storage_choice);
    }

    let mut book = Phonebook::new()?;

    println!("\n--- Contact BOOK ---");
    println!("Current storage choice is: {}", book.storage.get_medium());

    loop {
        let command = match cli::parse_command_from_menu() {
            Ok(command) => command,
            Err(err @ AppError::ParseCommand(_)) => {
                eprintln!("{err}");
                continue;
            }
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };

        match command {
            Command::AddContact => add_contact(&mut book)?,
            Command::ListContacts => list_contacts(&book),
            Command::FindByName => find_by_name(&book)?,
            Command::FindByPhone => find_by_phone(&book)?,
            Command::UpdateContact => update_contact(&mut book)?,
            Command::DeleteContact => delete_contact(&mut book)?,
            Command::ExportCsv => export_csv(&book)?,
            Command::ImportCsv => import_csv(&mut book)?,
            Command::Exit => {
                println!("\nBye!");
                break;
            }
        }
    }

    Ok(())
}

fn add_contact(book: &mut Phonebook) -> Result<(), AppError> {
    let name = cli::retry("Enter contact name", validate_name)?;
    if name == "*" {
        return Ok(());
    }

    let mut phones = BTreeMap::new();
    loop {
        let label = cli::retry("Enter phone label (e.g. home, work, mobile)", |input| {
            !input.trim().is_empty()
        })?;
        if label == "*" {
            return Ok(());
        }
        let label = normalize_label(&label);

        let number = cli::retry(&format!("Enter {label} phone number"), validate_number)?;
        if number == "*" {
            return Ok(());
        }

        phones.insert(label, number);

        if cli::prompt("Add another number? (y/n)")?.to_lowercase() != "y" {
            break;
        }
    }

    // Collected last and checked by the store: a bad address discards the
    // whole contact, phones included.
    let email = cli::prompt("Enter email address (optional):")?;

    match book.add_contact(&name, phones, &email) {
        Ok(()) => println!("Contact '{name}' added successfully!"),
        Err(err @ AppError::Validation(_)) => eprintln!("{err}"),
        Err(err) => eprintln!("Contact '{name}' was added but could not be saved: {err}"),
    }
    Ok(())
}

fn list_contacts(book: &Phonebook) {
    if book.is_empty() {
        println!("Phonebook is empty.");
        return;
    }

    for (i, (name, contact)) in book.contact_list().enumerate() {
        println!(
            "{:>3}. {:<20} [{}] {}",
            i + 1,
            name,
            contact.phone_summary(),
            contact.email
        );
    }
}

fn find_by_name(book: &Phonebook) -> Result<(), AppError> {
    let name = cli::prompt("Enter name to search:")?;
    if name == "*" {
        return Ok(());
    }

    match book.find_by_name(&name) {
        Some(contact) => println!("\nFound:\n{}", cli::display_contact(&name, contact)),
        None => eprintln!("{}", AppError::NotFound(format!("Contact '{name}'"))),
    }
    Ok(())
}

fn find_by_phone(book: &Phonebook) -> Result<(), AppError> {
    let number = cli::prompt("Enter phone number to search:")?;
    if number == "*" {
        return Ok(());
    }

    let matches: Vec<(&str, &str, &crate::domain::Contact)> = book.find_by_phone(&number).collect();

    if matches.is_empty() {
        eprintln!("{}", AppError::NotFound(format!("Phone number '{number}'")));
        return Ok(());
    }

    for (name, label, contact) in matches {
        println!(
            "Found: Name: {name}, Label: {label}, Phone: {number}, Email: {}",
            contact.email
        );
    }
    Ok(())
}

fn update_contact(book: &mut Phonebook) -> Result<(), AppError> {
    let name = cli::prompt("Enter name to update:")?;
    if name == "*" {
        return Ok(());
    }

    let Some(contact) = book.find_by_name(&name) else {
        eprintln!("{}", AppError::NotFound(format!("Contact '{name}'")));
        return Ok(());
    };

    // Edits are collected first and applied in one update call; the
    // preview keeps the "Current phones" display honest meanwhile.
    let mut preview = contact.clone();
    let mut edits: Vec<ContactEdit> = Vec::new();

    loop {
        println!("\nCurrent phones: [{}]", preview.phone_summary());
        let action =
            cli::prompt("Choose: [a]dd phone, [u]pdate phone, [d]elete phone, [q]uit:")?
                .to_lowercase();

        match action.as_str() {
            "a" => {
                let label = normalize_label(&cli::prompt("Enter label for new phone:")?);
                if label.is_empty() {
                    eprintln!("{}", AppError::Validation("Label cannot be empty".to_string()));
                    continue;
                }
                let number = cli::prompt(&format!("Enter {label} phone number:"))?;
                if !validate_number(&number) {
                    eprintln!("{}", AppError::Validation(ValidationReq::phone_req()));
                    continue;
                }
                preview.phones.insert(label.clone(), number.clone());
                edits.push(ContactEdit::AddPhone { label, number });
            }
            "u" => {
                let label = normalize_label(&cli::prompt("Which phone label to update?")?);
                if !preview.phones.contains_key(&label) {
                    eprintln!("{}", AppError::NotFound(format!("Label '{label}'")));
                    continue;
                }
                let number = cli::prompt("Enter new number:")?;
                if !validate_number(&number) {
                    eprintln!("{}", AppError::Validation(ValidationReq::phone_req()));
                    continue;
                }
                preview.phones.insert(label.clone(), number.clone());
                edits.push(ContactEdit::SetPhone { label, number });
            }
            "d" => {
                let label = normalize_label(&cli::prompt("Which phone label to delete?")?);
                if preview.phones.remove(&label).is_none() {
                    eprintln!("{}", AppError::NotFound(format!("Label '{label}'")));
                    continue;
                }
                edits.push(ContactEdit::RemovePhone { label });
            }
            "q" => break,
            other => eprintln!("{}", AppError::ParseCommand(other.to_string())),
        }
    }

    let email = cli::prompt("Enter new email (leave blank to keep current):")?;
    if !email.is_empty() {
        edits.push(ContactEdit::ReplaceEmail { email });
    }

    let report = match book.update(&name, edits) {
        Ok(report) => report,
        Err(err @ AppError::NotFound(_)) => {
            eprintln!("{err}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("Contact '{name}' was updated but could not be saved: {err}");
            return Ok(());
        }
    };

    for rejected in &report.rejected {
        eprintln!("{rejected}");
    }
    println!("Contact '{name}' updated successfully!");

    if report.no_phones_left {
        println!("Contact '{name}' has no phone numbers left!");
        cli::confirm_action(&format!("delete contact '{name}'"))?;

        if cli::get_input_to_lower()? == "y" {
            match book.delete_contact(&name) {
                Ok(()) => println!("Contact '{name}' deleted because it had no numbers."),
                Err(err) => eprintln!("{err}"),
            }
        }
    }
    Ok(())
}

fn delete_contact(book: &mut Phonebook) -> Result<(), AppError> {
    let name = cli::prompt("Enter name to delete:")?;
    if name == "*" {
        return Ok(());
    }

    let Some(contact) = book.find_by_name(&name) else {
        eprintln!("{}", AppError::NotFound(format!("Contact '{name}'")));
        return Ok(());
    };

    cli::confirm_action(&format!(
        "delete this contact from your contact list \n{}",
        cli::display_contact(&name, contact)
    ))?;

    if cli::get_input_to_lower()? != "y" {
        return Ok(());
    }

    match book.delete_contact(&name) {
        Ok(()) => println!("Contact '{name}' deleted successfully!"),
        Err(err @ AppError::NotFound(_)) => eprintln!("{err}"),
        Err(err) => eprintln!("Contact '{name}' was deleted but could not be saved: {err}"),
    }
    Ok(())
}

fn export_csv(book: &Phonebook) -> Result<(), AppError> {
    let path = cli::prompt("Enter destination path (blank for default):")?;
    if path == "*" {
        return Ok(());
    }

    let des = if path.is_empty() { None } else { Some(path.as_str()) };

    match export_contacts_to_csv(&book.mem, des) {
        Ok((path, total)) => println!("Successfully exported {total} contacts to {path:?}."),
        Err(err) => eprintln!("{err}"),
    }
    Ok(())
}

fn import_csv(book: &mut Phonebook) -> Result<(), AppError> {
    let path = cli::prompt("Enter source path (blank for default):")?;
    if path == "*" {
        return Ok(());
    }

    let src = if path.is_empty() { None } else { Some(path.as_str()) };

    match import_contacts_from_csv(book, src) {
        Ok((path, total)) => println!("Successfully imported {total} contacts from {path:?}."),
        Err(err) => eprintln!("{err}"),
    }
    Ok(())
}
