use std::collections::BTreeMap;

use super::ContactStore;
use crate::domain::contact::Contact;
use crate::errors::AppError;

/// In-memory backend: `load` hands out the seeded data, `save` is a
/// no-op. Used by unit tests and benches.
pub struct MemStore {
    pub data: BTreeMap<String, Contact>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<BTreeMap<String, Contact>, AppError> {
        Ok(self.data.clone())
    }

    fn save(&self, _contacts: &BTreeMap<String, Contact>) -> Result<(), AppError> {
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
