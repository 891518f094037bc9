/// Pending mutations and their reconciliation rules
///
/// Every mutating operation follows the same shape: open a prompt recording
/// what is pending, submit one request, and on success replace local state
/// with the server's authoritative answer. On failure the prompt stays open
/// with its entered data so the user can retry without re-entering anything.

use std::path::PathBuf;

use crate::api::types::{Owner, PermissionRecord, PermissionSet};
use crate::state::path;

/// Which flag of a permission row is being changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionField {
    Read,
    Write,
    Manage,
}

/// A pending, user-confirmable mutation intent
///
/// One tagged union instead of duck-typed dialog objects: each variant
/// carries exactly the fields its submission needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Upload a file into the current folder
    AddFile { upload: Option<PathBuf> },
    /// Create a subfolder in the current folder
    CreateFolder { name: String },
    /// Delete the recorded target path
    Delete { target: String },
    /// Edit the current folder's sharing configuration
    Manage {
        /// The working copy being edited; `None` until the fetch resolves
        permissions: Option<PermissionSet>,
        /// Owner picked for the next permission row
        pending_owner: Option<Owner>,
    },
}

/// Coordinator for the four mutating operations
#[derive(Debug, Default)]
pub struct Mutations {
    prompt: Option<Prompt>,
    /// Last server-confirmed sharing configuration
    permissions: Option<PermissionSet>,
    /// Sequence number of the most recent submission; completions carrying
    /// an older number are superseded and dropped
    seq: u64,
}

impl Mutations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Last sharing configuration the server confirmed, if any was loaded
    pub fn permissions(&self) -> Option<&PermissionSet> {
        self.permissions.as_ref()
    }

    /// Close the open prompt, discarding its entered data
    pub fn cancel(&mut self) {
        self.prompt = None;
    }

    // ---- add file ----

    pub fn prompt_add(&mut self) {
        self.prompt = Some(Prompt::AddFile { upload: None });
    }

    /// Record the file picked for upload
    pub fn set_upload(&mut self, file: PathBuf) {
        if let Some(Prompt::AddFile { upload }) = &mut self.prompt {
            *upload = Some(file);
        }
    }

    /// The pending upload, if the add prompt is open and a file was picked
    pub fn upload(&self) -> Option<&PathBuf> {
        match &self.prompt {
            Some(Prompt::AddFile { upload }) => upload.as_ref(),
            _ => None,
        }
    }

    // ---- create folder ----

    pub fn prompt_create(&mut self) {
        self.prompt = Some(Prompt::CreateFolder {
            name: String::new(),
        });
    }

    pub fn set_folder_name(&mut self, name: String) {
        if let Some(Prompt::CreateFolder { name: pending }) = &mut self.prompt {
            *pending = name;
        }
    }

    /// The pending folder name, if the create prompt is open and non-empty
    pub fn folder_name(&self) -> Option<&str> {
        match &self.prompt {
            Some(Prompt::CreateFolder { name }) if !name.trim().is_empty() => Some(name),
            _ => None,
        }
    }

    // ---- delete ----

    /// Record the target to delete; submission needs no further confirmation
    pub fn prompt_delete(&mut self, target: &str) {
        self.prompt = Some(Prompt::Delete {
            target: path::rooted(target),
        });
    }

    pub fn delete_target(&self) -> Option<&str> {
        match &self.prompt {
            Some(Prompt::Delete { target }) => Some(target),
            _ => None,
        }
    }

    // ---- manage permissions ----

    /// Open the sharing dialog; the caller fetches the permission set
    pub fn prompt_manage(&mut self) {
        self.prompt = Some(Prompt::Manage {
            permissions: self.permissions.clone(),
            pending_owner: None,
        });
    }

    /// Fill the dialog with the fetched permission set
    ///
    /// Dropped when the dialog has been closed meanwhile, and never
    /// clobbers a working copy the user already has on screen.
    pub fn permissions_loaded(&mut self, set: PermissionSet) {
        self.permissions = Some(set.clone());
        if let Some(Prompt::Manage { permissions, .. }) = &mut self.prompt {
            if permissions.is_none() {
                *permissions = Some(set);
            }
        }
    }

    pub fn set_description(&mut self, description: String) {
        if let Some(Prompt::Manage {
            permissions: Some(set),
            ..
        }) = &mut self.prompt
        {
            set.description = description;
        }
    }

    pub fn select_owner(&mut self, owner: Owner) {
        if let Some(Prompt::Manage { pending_owner, .. }) = &mut self.prompt {
            *pending_owner = Some(owner);
        }
    }

    /// Append a permission row for the picked owner (read-only by default)
    pub fn add_permission(&mut self) {
        if let Some(Prompt::Manage {
            permissions: Some(set),
            pending_owner,
        }) = &mut self.prompt
        {
            let Some(owner) = pending_owner.take() else {
                return;
            };
            if set.permissions.iter().any(|p| p.owner == owner.value) {
                return;
            }
            set.permissions.push(PermissionRecord {
                owner: owner.value,
                can_read: true,
                can_write: false,
                can_manage: false,
            });
        }
    }

    pub fn remove_permission(&mut self, index: usize) {
        if let Some(Prompt::Manage {
            permissions: Some(set),
            ..
        }) = &mut self.prompt
        {
            if index < set.permissions.len() {
                set.permissions.remove(index);
            }
        }
    }

    pub fn toggle_permission(&mut self, index: usize, field: PermissionField, value: bool) {
        if let Some(Prompt::Manage {
            permissions: Some(set),
            ..
        }) = &mut self.prompt
        {
            let Some(record) = set.permissions.get_mut(index) else {
                return;
            };
            match field {
                PermissionField::Read => record.can_read = value,
                PermissionField::Write => record.can_write = value,
                PermissionField::Manage => record.can_manage = value,
            }
        }
    }

    /// The edited configuration ready for submission
    pub fn manage_edit(&self) -> Option<&PermissionSet> {
        match &self.prompt {
            Some(Prompt::Manage {
                permissions: Some(set),
                ..
            }) => Some(set),
            _ => None,
        }
    }

    // ---- submission sequencing ----

    /// Stamp a new submission; only this submission's completion is honored
    pub fn begin_submit(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// A confirmed add/create/delete: clears the prompt. Returns false for
    /// superseded completions, which must be dropped by the caller.
    pub fn submit_succeeded(&mut self, seq: u64) -> bool {
        if seq != self.seq {
            return false;
        }
        self.prompt = None;
        true
    }

    /// A failed submission: the prompt stays open for retry. Returns
    /// whether the failure belongs to the current submission.
    pub fn submit_failed(&mut self, seq: u64) -> bool {
        seq == self.seq
    }

    /// A confirmed permission update: closes the dialog and keeps the
    /// server's answer as the configuration now in effect
    pub fn manage_succeeded(&mut self, seq: u64, set: PermissionSet) -> bool {
        if seq != self.seq {
            return false;
        }
        self.prompt = None;
        self.permissions = Some(set);
        true
    }
}
