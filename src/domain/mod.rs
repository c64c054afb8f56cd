pub mod book;
pub mod contact;

pub use book::{ContactEdit, Phonebook, UpdateReport};
pub use contact::Contact;
