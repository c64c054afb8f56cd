use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rusty-phonebook", version, about = "Simple Contact Directory")]
pub struct Cli {
    /// Storage choice (txt, json) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("json"))]
    pub storage_choice: String,
}

/// Menu actions, one per numbered entry.
#[derive(Debug)]
pub enum Command {
    AddContact,
    ListContacts,
    FindByName,
    FindByPhone,
    UpdateContact,
    DeleteContact,
    ExportCsv,
    ImportCsv,
    Exit,
}
