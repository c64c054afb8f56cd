pub mod command;
pub mod run;

pub use run::run_app;

use std::io::{self, Write};

use crate::domain::contact::Contact;
use crate::errors::AppError;

use command::Command;

// OUTPUT FUNCTIONS
pub fn parse_command_from_menu() -> Result<Command, AppError> {
    println!("\n--- Phonebook Menu ---");
    println!("1. Add Contact");
    println!("2. List Contacts");
    println!("3. Find Contact by Name");
    println!("4. Find Contact by Phone");
    println!("5. Update Contact");
    println!("6. Delete Contact");
    println!("7. Export Contacts to CSV");
    println!("8. Import Contacts from CSV");
    println!("9. Exit");
    print!("> ");
    io::stdout().flush()?;

    let action = get_input()?;

    match action.as_str() {
        "1" => Ok(Command::AddContact),
        "2" => Ok(Command::ListContacts),
        "3" => Ok(Command::FindByName),
        "4" => Ok(Command::FindByPhone),
        "5" => Ok(Command::UpdateContact),
        "6" => Ok(Command::DeleteContact),
        "7" => Ok(Command::ExportCsv),
        "8" => Ok(Command::ImportCsv),
        "9" => Ok(Command::Exit),
        _ => Err(AppError::ParseCommand(action)),
    }
}

pub fn confirm_action(action: &str) -> Result<(), AppError> {
    println!("\nAre you sure you want to {action}? (y/n)");
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

pub fn display_contact(name: &str, contact: &Contact) -> String {
    format!(
        "Name: {}\n\
        Phones: [{}]\n\
        Email: {}",
        name,
        contact.phone_summary(),
        contact.email
    )
}

// INPUT FUNCTIONS
pub fn get_input() -> Result<String, AppError> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        // stdin closed; callers treat this as "leave the menu"
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(input.trim().to_string())
}

pub fn get_input_to_lower() -> Result<String, AppError> {
    Ok(get_input()?.to_lowercase())
}

pub fn prompt(message: &str) -> Result<String, AppError> {
    println!("\n{message}");
    print!("> ");
    io::stdout().flush()?;
    get_input()
}

/// Prompt until `valid` accepts the input. '*' always escapes and is
/// handed back to the caller to unwind.
pub fn retry<V>(message: &str, valid: V) -> Result<String, AppError>
where
    V: Fn(&str) -> bool,
{
    loop {
        println!("\n{message} \n* to go back: ");
        print!("> ");
        io::stdout().flush()?;

        let input = get_input()?;

        if input == "*" || valid(&input) {
            return Ok(input);
        }

        eprintln!("{}", AppError::Validation("Invalid input.".to_string()));
    }
}
