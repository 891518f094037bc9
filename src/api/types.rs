/// Response models for the photo store API
///
/// These structs mirror the JSON the server produces. They are replaced in
/// whole on every successful fetch or mutation response, never patched
/// field-by-field, so stale entries can never survive a reload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions the server extracted from an image file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// [width, height] in pixels
    pub size: [u32; 2],
}

/// One file inside a folder listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    /// File size in bytes
    pub size: u64,
    #[serde(default)]
    pub mimetype: Option<String>,
    /// Present only for files the server recognized as images
    #[serde(default)]
    pub image: Option<ImageInfo>,
}

impl FileEntry {
    /// Whether the server classified this file as a displayable image
    pub fn is_image(&self) -> bool {
        self.image.is_some()
            || self
                .mimetype
                .as_deref()
                .is_some_and(|m| m.starts_with("image/"))
    }
}

/// A subfolder reference inside a folder listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// The authoritative snapshot of what the server says a folder contains
///
/// Exactly one of these is live at a time: loading a new folder discards
/// the previous one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FolderContents {
    pub name: String,
    pub path: String,
    pub files: Vec<FileEntry>,
    pub folders: Vec<FolderEntry>,
    /// Whether the requesting user may add or delete entries here
    #[serde(default)]
    pub can_write: Option<bool>,
    /// Whether the requesting user may change this folder's sharing
    #[serde(default)]
    pub can_manage: Option<bool>,
}

/// An owner a permission can be assigned to, e.g. `user:alice`,
/// `group:family` or `other:all`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Owner kind: "user", "group" or "other"
    pub group: String,
    pub name: String,
    /// Stable identifier the server expects back, e.g. "user:alice"
    pub value: String,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// One assigned permission row in a folder's sharing configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermissionRecord {
    /// The owner this row applies to, by its `value` identifier
    pub owner: String,
    pub can_read: bool,
    pub can_write: bool,
    pub can_manage: bool,
}

/// A folder's sharing configuration, loaded when the manage dialog opens
///
/// Lives independently of [`FolderContents`]: refreshing one never touches
/// the other.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    pub description: String,
    /// Owners a new permission row may be assigned to
    #[serde(default)]
    pub owners: Vec<Owner>,
    /// Permission rows currently in effect
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_folder_contents() {
        let json = r#"{
            "files": [
                {
                    "image": { "size": [1024, 683] },
                    "mimetype": "image/jpeg",
                    "name": "foo.jpg",
                    "path": "/foo/bar/foo.jpg",
                    "size": 186899
                }
            ],
            "folders": [
                { "name": "baz", "path": "/foo/bar/baz/" }
            ],
            "name": "bar",
            "path": "/foo/bar/",
            "can_write": true
        }"#;

        let contents: FolderContents = serde_json::from_str(json).unwrap();
        assert_eq!(contents.name, "bar");
        assert_eq!(contents.path, "/foo/bar/");
        assert_eq!(contents.files.len(), 1);
        assert_eq!(contents.files[0].size, 186899);
        assert_eq!(contents.files[0].image.as_ref().unwrap().size, [1024, 683]);
        assert_eq!(contents.folders[0].name, "baz");
        assert_eq!(contents.can_write, Some(true));
        assert_eq!(contents.can_manage, None);
    }

    #[test]
    fn test_decode_empty_root() {
        let json = r#"{ "files": [], "folders": [], "name": "", "path": "/" }"#;
        let contents: FolderContents = serde_json::from_str(json).unwrap();
        assert!(contents.files.is_empty());
        assert!(contents.folders.is_empty());
        assert_eq!(contents.path, "/");
    }

    #[test]
    fn test_is_image() {
        let mut entry = FileEntry {
            name: "notes.txt".into(),
            path: "/notes.txt".into(),
            size: 12,
            mimetype: Some("text/plain".into()),
            image: None,
        };
        assert!(!entry.is_image());

        entry.mimetype = Some("image/png".into());
        assert!(entry.is_image());

        entry.mimetype = None;
        entry.image = Some(ImageInfo { size: [640, 480] });
        assert!(entry.is_image());
    }

    #[test]
    fn test_decode_permission_set() {
        let json = r#"{
            "description": "Family photos",
            "owners": [
                { "group": "user", "name": "alice", "value": "user:alice" },
                { "group": "other", "name": "all", "value": "other:all" }
            ],
            "permissions": [
                {
                    "owner": "user:alice",
                    "can_read": true,
                    "can_write": true,
                    "can_manage": false
                }
            ]
        }"#;

        let set: PermissionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.description, "Family photos");
        assert_eq!(set.owners.len(), 2);
        assert_eq!(set.owners[1].to_string(), "other:all");
        assert!(set.permissions[0].can_write);
        assert!(!set.permissions[0].can_manage);
    }
}
