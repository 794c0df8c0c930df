use std::collections::HashMap;

use super::StorageMedium;
use crate::error::Result;

/// In-memory key-value medium for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_of_unset_key_is_none() {
        let medium = MemoryMedium::new();
        assert_eq!(medium.get("missing").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut medium = MemoryMedium::new();
        medium.set("k", "v").unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("v"));
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
    }
}
