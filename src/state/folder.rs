/// The authoritative folder snapshot
///
/// Holds the one live `FolderContents` (what the server last confirmed the
/// current folder contains) together with the adjacency derived from it.
/// State is only ever replaced wholesale. The design deliberately avoids
/// speculative local edits, so the client can never diverge from the server.

use crate::api::types::{FileEntry, FolderContents};
use crate::state::adjacency::{self, Adjacency};

/// Local store for the currently loaded folder
#[derive(Debug, Clone, Default)]
pub struct FolderStore {
    contents: Option<FolderContents>,
    adjacency: Adjacency,
}

impl FolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a fresh server listing
    ///
    /// Wholesale replacement: entries from the previous snapshot must never
    /// survive a reload. Adjacency is recomputed against `current_path`.
    pub fn load(&mut self, contents: FolderContents, current_path: &str) {
        self.contents = Some(contents);
        self.refresh_adjacency(current_path);
    }

    /// Apply the listing a successful mutation answered with
    ///
    /// Identical replacement semantics to [`load`](Self::load): the server's
    /// response is authoritative, not a locally guessed delta.
    pub fn apply_mutation_result(&mut self, contents: FolderContents, current_path: &str) {
        self.load(contents, current_path);
    }

    /// Recompute adjacency after the current path changed
    pub fn refresh_adjacency(&mut self, current_path: &str) {
        self.adjacency = match &self.contents {
            Some(contents) => adjacency::resolve(&contents.files, current_path),
            None => Adjacency::default(),
        };
    }

    pub fn contents(&self) -> Option<&FolderContents> {
        self.contents.as_ref()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn files(&self) -> &[FileEntry] {
        self.contents.as_ref().map(|c| c.files.as_slice()).unwrap_or(&[])
    }

    /// Whether the user may add or delete entries in this folder
    pub fn can_write(&self) -> bool {
        self.contents
            .as_ref()
            .and_then(|c| c.can_write)
            .unwrap_or(false)
    }

    /// Whether the user may change this folder's sharing
    pub fn can_manage(&self) -> bool {
        self.contents
            .as_ref()
            .and_then(|c| c.can_manage)
            .unwrap_or(false)
    }
}
