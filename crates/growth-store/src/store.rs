//! Storage port for the child list.

use crate::document::ChildList;
use crate::error::Result;

/// Loads and saves the whole child list at once.
pub trait ChildStore {
    /// Load the stored list. A store with nothing saved yet yields an empty list.
    fn load(&self) -> Result<ChildList>;

    /// Save `list`, updating its modification timestamp.
    fn save(&mut self, list: &mut ChildList) -> Result<()>;
}

/// Store kept in memory, for tests and one-off sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    list: Option<ChildList>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(list: ChildList) -> Self {
        Self { list: Some(list) }
    }
}

impl ChildStore for MemoryStore {
    fn load(&self) -> Result<ChildList> {
        Ok(self.list.clone().unwrap_or_default())
    }

    fn save(&mut self, list: &mut ChildList) -> Result<()> {
        list.touch();
        self.list = Some(list.clone());
        Ok(())
    }
}
