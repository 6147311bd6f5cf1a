use crate::backend::{DocHandle, DocKind};
use std::collections::HashMap;

/// An open document known to the server: the backend handle plus the
/// application kind recorded when the document was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentEntry {
    pub handle: DocHandle,
    pub kind: DocKind,
}

/// Maps opaque session ids to open document handles. The registry owns only
/// the id mapping; the documents themselves live in the backend. State is
/// process-lifetime with no durability: a restart orphans whatever the
/// external office process still has open.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    entries: HashMap<String, DocumentEntry>,
    next_id: u64,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handle under a fresh id and return the id.
    pub fn register(&mut self, handle: DocHandle, kind: DocKind) -> String {
        let id = format!("doc_{}", self.next_id);
        self.next_id += 1;
        self.entries.insert(id.clone(), DocumentEntry { handle, kind });
        id
    }

    pub fn resolve(&self, id: &str) -> Option<DocumentEntry> {
        self.entries.get(id).copied()
    }

    /// Remove an entry. Does not close the underlying document; the close
    /// adapter makes that backend call explicitly.
    pub fn unregister(&mut self, id: &str) -> Option<DocumentEntry> {
        self.entries.remove(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the registry, yielding every entry. Used at shutdown so the
    /// server can close each still-open document.
    pub fn drain(&mut self) -> Vec<(String, DocumentEntry)> {
        self.entries.drain().collect()
    }
}
