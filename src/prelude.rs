pub use crate::cli::{command, run_app};
pub use crate::domain::{
    book::{ContactEdit, Phonebook, UpdateReport},
    contact::{self, Contact},
};
pub use crate::errors::AppError;
pub use crate::store::{self, ContactStore, StorageMediums, memory::MemStore, parse_storage_type};
