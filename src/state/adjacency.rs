/// Previous/current/next adjacency within a folder's file list
///
/// Adjacency is derived state: it is recomputed whenever the folder's files
/// change or the current path changes, and never stored independently of
/// the folder snapshot it came from.

use crate::api::types::FileEntry;
use crate::state::path;

/// The neighbours of the currently viewed file, if any
///
/// `current` is set iff the current path matches exactly one entry in the
/// folder's file list; when nothing matches (the user is viewing a folder,
/// not a photo) all three fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    pub previous: Option<FileEntry>,
    pub current: Option<FileEntry>,
    pub next: Option<FileEntry>,
}

/// Scan an ordered file list for the entry matching `current_path`
///
/// Entries are compared under leading-slash-normalized equality, and the
/// neighbours are taken by position in the server-provided order: the
/// server's ordering is authoritative, sorted or not. O(n) in the number
/// of files; only the final state after scanning all entries matters.
pub fn resolve(files: &[FileEntry], current_path: &str) -> Adjacency {
    let target = path::rooted(current_path);

    match files.iter().position(|f| path::rooted(&f.path) == target) {
        Some(index) => Adjacency {
            previous: if index > 0 {
                files.get(index - 1).cloned()
            } else {
                None
            },
            current: files.get(index).cloned(),
            next: files.get(index + 1).cloned(),
        },
        None => Adjacency::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: format!("/foo/bar/{}", name),
            size: 1000,
            mimetype: Some("image/jpeg".to_string()),
            image: None,
        }
    }

    fn files() -> Vec<FileEntry> {
        vec![entry("foo.jpg"), entry("bar.jpg"), entry("baz.jpg")]
    }

    #[test]
    fn test_middle_entry_has_both_neighbours() {
        let adjacency = resolve(&files(), "/foo/bar/bar.jpg");
        assert_eq!(adjacency.previous.unwrap().name, "foo.jpg");
        assert_eq!(adjacency.current.unwrap().name, "bar.jpg");
        assert_eq!(adjacency.next.unwrap().name, "baz.jpg");
    }

    #[test]
    fn test_first_entry_has_no_previous() {
        let adjacency = resolve(&files(), "/foo/bar/foo.jpg");
        assert_eq!(adjacency.previous, None);
        assert_eq!(adjacency.current.unwrap().name, "foo.jpg");
        assert_eq!(adjacency.next.unwrap().name, "bar.jpg");
    }

    #[test]
    fn test_last_entry_has_no_next() {
        let adjacency = resolve(&files(), "/foo/bar/baz.jpg");
        assert_eq!(adjacency.previous.unwrap().name, "bar.jpg");
        assert_eq!(adjacency.current.unwrap().name, "baz.jpg");
        assert_eq!(adjacency.next, None);
    }

    #[test]
    fn test_no_match_yields_empty_adjacency() {
        let adjacency = resolve(&files(), "/foo/bar/");
        assert_eq!(adjacency, Adjacency::default());

        let adjacency = resolve(&files(), "/somewhere/else.jpg");
        assert_eq!(adjacency, Adjacency::default());
    }

    #[test]
    fn test_empty_list_yields_empty_adjacency() {
        assert_eq!(resolve(&[], "/foo/bar/foo.jpg"), Adjacency::default());
    }

    #[test]
    fn test_comparison_normalizes_leading_slash() {
        // Server entries may omit the leading slash
        let mut listing = files();
        for file in &mut listing {
            file.path = file.path.trim_start_matches('/').to_string();
        }
        let adjacency = resolve(&listing, "/foo/bar/bar.jpg");
        assert_eq!(adjacency.current.unwrap().name, "bar.jpg");
    }

    #[test]
    fn test_server_order_is_authoritative() {
        // Not alphabetical; neighbours follow list position, not names
        let listing = vec![entry("zzz.jpg"), entry("aaa.jpg"), entry("mmm.jpg")];
        let adjacency = resolve(&listing, "/foo/bar/aaa.jpg");
        assert_eq!(adjacency.previous.unwrap().name, "zzz.jpg");
        assert_eq!(adjacency.next.unwrap().name, "mmm.jpg");
    }
}
