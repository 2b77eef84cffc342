//! The stored child list.

use chrono::{DateTime, Utc};
use growth_model::Child;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Every child a user tracks, with creation and modification timestamps.
///
/// Serialized as `{ "children": [...], "createdAt": ..., "lastModified": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildList {
    pub children: Vec<Child>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Default for ChildList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChildList {
    pub fn new(children: Vec<Child>) -> Self {
        let now = Utc::now();
        Self {
            children,
            created_at: now,
            last_modified: now,
        }
    }

    /// Update the modification timestamp.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Mutable access to a child by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ChildNotFound`] if no child has this id.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut Child> {
        self.children
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::ChildNotFound { id: id.to_string() })
    }

    /// Add a child, replacing any child with the same id.
    pub fn upsert(&mut self, child: Child) {
        match self.children.iter_mut().find(|c| c.id == child.id) {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Child> {
        let index = self.children.iter().position(|c| c.id == id)?;
        Some(self.children.remove(index))
    }

    /// Next free id of the form `{prefix}{n}`, counting from 1.
    pub fn next_id(&self, prefix: &str) -> String {
        let used = self
            .children
            .iter()
            .map(|c| c.id.as_str())
            .chain(
                self.children
                    .iter()
                    .flat_map(|c| c.measurements.iter().map(|m| m.id.as_str())),
            )
            .filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{prefix}{}", used + 1)
    }
}

/// On-disk forms accepted when loading.
///
/// Besides the full document, a bare array of children is accepted.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredChildren {
    Document(ChildList),
    Bare(Vec<Child>),
}

impl From<StoredChildren> for ChildList {
    fn from(stored: StoredChildren) -> Self {
        match stored {
            StoredChildren::Document(list) => list,
            StoredChildren::Bare(children) => ChildList::new(children),
        }
    }
}
