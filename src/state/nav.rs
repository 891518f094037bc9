/// The navigation controller
///
/// One authoritative view path, a transient transition direction for the
/// presentation layer, and the reconciliation rules for folder listings
/// arriving out of order. Navigation intents return the folder path whose
/// listing must be fetched; the application shell turns that into an async
/// task and feeds the result back through `contents_loaded`.

use crate::api::types::{FileEntry, FolderContents};
use crate::state::folder::FolderStore;
use crate::state::path::{self, Crumb};

/// Presentation hint for the direction of the last navigation
///
/// Forward means "into a child or to a sibling file"; backward means an
/// explicit up, home or previous-photo move. This is a hint for slide
/// animations, not a correctness-critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Forward,
    Backward,
}

/// State machine over the currently displayed path
#[derive(Debug, Default)]
pub struct Navigator {
    /// The currently displayed path, always rooted
    view_path: String,
    /// One-shot direction hint: set by navigation, observed once, settled
    transition: Option<Transition>,
    /// True between a path change and the arrival of its folder listing
    loading: bool,
    folder: FolderStore,
}

impl Navigator {
    /// Create a navigator positioned at `initial` and return the folder
    /// path whose listing must be fetched first
    pub fn new(initial: &str) -> (Self, String) {
        let view_path = path::rooted(initial);
        let fetch = path::containing_folder(&view_path);
        let navigator = Navigator {
            view_path,
            transition: None,
            loading: true,
            folder: FolderStore::new(),
        };
        (navigator, fetch)
    }

    /// Navigate into a folder or to a file (forward)
    pub fn show(&mut self, target: &str) -> Option<String> {
        Some(self.navigate(target, Transition::Forward))
    }

    /// Navigate to a breadcrumb prefix (backward)
    pub fn show_crumb(&mut self, target: &str) -> Option<String> {
        Some(self.navigate(target, Transition::Backward))
    }

    /// Navigate to the root folder (backward)
    pub fn go_home(&mut self) -> Option<String> {
        Some(self.navigate("/", Transition::Backward))
    }

    /// Navigate to the next photo, if there is one
    ///
    /// A no-op when adjacency has no next entry: the view path and the
    /// transition hint both stay untouched.
    pub fn show_next(&mut self) -> Option<String> {
        let target = self.folder.adjacency().next.as_ref()?.path.clone();
        Some(self.navigate(&target, Transition::Forward))
    }

    /// Navigate to the previous photo, if there is one
    pub fn show_previous(&mut self) -> Option<String> {
        let target = self.folder.adjacency().previous.as_ref()?.path.clone();
        Some(self.navigate(&target, Transition::Backward))
    }

    fn navigate(&mut self, target: &str, transition: Transition) -> String {
        self.view_path = path::rooted(target);
        self.transition = Some(transition);
        self.loading = true;
        // Adjacency follows the path immediately, against the snapshot we
        // already have; the fetch below will reconcile it with the server.
        self.folder.refresh_adjacency(&self.view_path);
        path::containing_folder(&self.view_path)
    }

    /// Apply a folder listing, unless it has been superseded
    ///
    /// Last-path-wins: the response is applied only when `folder_path`
    /// still matches the folder of the current view path. Returns whether
    /// the listing was applied.
    pub fn contents_loaded(&mut self, folder_path: &str, contents: FolderContents) -> bool {
        if path::rooted(folder_path) != self.current_folder_path() {
            return false;
        }
        let current = self.view_path.clone();
        self.folder.load(contents, &current);
        self.loading = false;
        true
    }

    /// Record a failed listing fetch
    ///
    /// Navigation stays on the requested path and the store keeps its
    /// last-good contents; only the loading flag is released, and only when
    /// the failure belongs to the fetch still in flight.
    pub fn fetch_failed(&mut self, folder_path: &str) {
        if path::rooted(folder_path) == self.current_folder_path() {
            self.loading = false;
        }
    }

    /// Replace the snapshot after a confirmed add or create
    pub fn apply_mutation(&mut self, contents: FolderContents) {
        let current = self.view_path.clone();
        self.folder.apply_mutation_result(contents, &current);
        self.loading = false;
    }

    /// Move to the folder a confirmed delete answered with and adopt its
    /// listing directly, without a second fetch
    pub fn adopt(&mut self, contents: FolderContents) {
        let target = path::rooted(&contents.path);
        self.view_path = target.clone();
        self.transition = Some(Transition::Backward);
        self.loading = false;
        self.folder.load(contents, &target);
    }

    /// Settle the one-shot transition hint after its single observation
    pub fn settle_transition(&mut self) {
        self.transition = None;
    }

    pub fn view_path(&self) -> &str {
        &self.view_path
    }

    /// The folder whose listing backs the current view
    pub fn current_folder_path(&self) -> String {
        path::containing_folder(&self.view_path)
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        path::breadcrumbs_for(&self.view_path)
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn folder(&self) -> &FolderStore {
        &self.folder
    }

    pub fn current_photo(&self) -> Option<&FileEntry> {
        self.folder.adjacency().current.as_ref()
    }

    pub fn next_photo(&self) -> Option<&FileEntry> {
        self.folder.adjacency().next.as_ref()
    }

    pub fn previous_photo(&self) -> Option<&FileEntry> {
        self.folder.adjacency().previous.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ImageInfo;

    fn photo(name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: format!("/foo/bar/{}", name),
            size: 180000,
            mimetype: Some("image/jpeg".to_string()),
            image: Some(ImageInfo { size: [1024, 683] }),
        }
    }

    fn empty_root() -> FolderContents {
        FolderContents {
            name: String::new(),
            path: "/".to_string(),
            files: vec![],
            folders: vec![],
            can_write: None,
            can_manage: None,
        }
    }

    fn bar_folder() -> FolderContents {
        FolderContents {
            name: "bar".to_string(),
            path: "/foo/bar/".to_string(),
            files: vec![photo("foo.jpg"), photo("bar.jpg"), photo("baz.jpg")],
            folders: vec![],
            can_write: Some(true),
            can_manage: Some(true),
        }
    }

    #[test]
    fn test_initial_fetch_targets_containing_folder() {
        let (nav, fetch) = Navigator::new("/");
        assert_eq!(fetch, "/");
        assert!(nav.is_loading());

        let (_, fetch) = Navigator::new("/foo/bar/bar.jpg");
        assert_eq!(fetch, "/foo/bar/");
    }

    #[test]
    fn test_empty_root_has_no_photos() {
        let (mut nav, fetch) = Navigator::new("/");
        assert!(nav.contents_loaded(&fetch, empty_root()));

        assert!(!nav.is_loading());
        assert_eq!(nav.current_photo(), None);
        assert_eq!(nav.next_photo(), None);
        assert_eq!(nav.previous_photo(), None);
        assert_eq!(
            nav.breadcrumbs(),
            vec![Crumb {
                name: "Home".to_string(),
                path: "/".to_string(),
            }]
        );
    }

    #[test]
    fn test_show_folder_goes_forward() {
        let (mut nav, fetch) = Navigator::new("/");
        nav.contents_loaded(&fetch, empty_root());

        let fetch = nav.show("/foo/");
        assert_eq!(fetch.as_deref(), Some("/foo/"));
        assert_eq!(nav.view_path(), "/foo/");
        assert_eq!(nav.transition(), Some(Transition::Forward));
        assert!(nav.is_loading());
    }

    #[test]
    fn test_next_previous_are_noops_in_a_folder() {
        let (mut nav, fetch) = Navigator::new("/");
        nav.contents_loaded(&fetch, empty_root());
        nav.settle_transition();

        assert_eq!(nav.show_next(), None);
        assert_eq!(nav.view_path(), "/");
        assert_eq!(nav.transition(), None);

        assert_eq!(nav.show_previous(), None);
        assert_eq!(nav.view_path(), "/");
        assert_eq!(nav.transition(), None);
    }

    #[test]
    fn test_adjacency_around_current_photo() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        assert!(nav.contents_loaded(&fetch, bar_folder()));

        assert_eq!(nav.previous_photo().unwrap().name, "foo.jpg");
        assert_eq!(nav.current_photo().unwrap().name, "bar.jpg");
        assert_eq!(nav.next_photo().unwrap().name, "baz.jpg");
    }

    #[test]
    fn test_show_next_photo() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.show_next();
        assert_eq!(fetch.as_deref(), Some("/foo/bar/"));
        assert_eq!(nav.view_path(), "/foo/bar/baz.jpg");
        assert_eq!(nav.transition(), Some(Transition::Forward));
        // Adjacency already follows from the loaded snapshot
        assert_eq!(nav.previous_photo().unwrap().name, "bar.jpg");
        assert_eq!(nav.next_photo(), None);
    }

    #[test]
    fn test_show_previous_photo() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.show_previous();
        assert_eq!(fetch.as_deref(), Some("/foo/bar/"));
        assert_eq!(nav.view_path(), "/foo/bar/foo.jpg");
        assert_eq!(nav.transition(), Some(Transition::Backward));
        assert_eq!(nav.previous_photo(), None);
        assert_eq!(nav.next_photo().unwrap().name, "bar.jpg");
    }

    #[test]
    fn test_go_home_goes_backward() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.go_home();
        assert_eq!(fetch.as_deref(), Some("/"));
        assert_eq!(nav.view_path(), "/");
        assert_eq!(nav.transition(), Some(Transition::Backward));
    }

    #[test]
    fn test_crumb_navigation_goes_backward() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.show_crumb("/foo/");
        assert_eq!(fetch.as_deref(), Some("/foo/"));
        assert_eq!(nav.transition(), Some(Transition::Backward));
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let (mut nav, first) = Navigator::new("/");
        nav.contents_loaded(&first, empty_root());

        let first = nav.show("/foo/bar/").unwrap();
        let second = nav.show("/other/").unwrap();

        // The first fetch resolves late; it no longer matches the view path
        assert!(!nav.contents_loaded(&first, bar_folder()));
        assert_eq!(nav.folder().files().len(), 0);
        assert!(nav.is_loading());

        // The fetch for the current target still applies
        let other = FolderContents {
            name: "other".to_string(),
            path: "/other/".to_string(),
            files: vec![],
            folders: vec![],
            can_write: None,
            can_manage: None,
        };
        assert!(nav.contents_loaded(&second, other.clone()));
        assert_eq!(nav.folder().contents(), Some(&other));
        assert!(!nav.is_loading());
    }

    #[test]
    fn test_sibling_fetches_share_a_folder_tag() {
        // Moving between photos of one folder re-requests the same listing;
        // whichever response arrives still matches and is applied
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.show_next().unwrap();
        assert!(nav.contents_loaded(&fetch, bar_folder()));
        assert_eq!(nav.current_photo().unwrap().name, "baz.jpg");
    }

    #[test]
    fn test_fetch_failure_keeps_last_good_contents() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        let fetch = nav.show("/elsewhere/").unwrap();
        nav.fetch_failed(&fetch);

        // Still on the requested path, store untouched, no longer loading
        assert_eq!(nav.view_path(), "/elsewhere/");
        assert_eq!(nav.folder().files().len(), 3);
        assert!(!nav.is_loading());
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading() {
        let (mut nav, _) = Navigator::new("/");
        let first = nav.show("/foo/bar/").unwrap();
        let _second = nav.show("/other/").unwrap();

        nav.fetch_failed(&first);
        assert!(nav.is_loading());
    }

    #[test]
    fn test_transition_settles_after_one_observation() {
        let (mut nav, _) = Navigator::new("/");
        nav.show("/foo/");
        assert_eq!(nav.transition(), Some(Transition::Forward));

        nav.settle_transition();
        assert_eq!(nav.transition(), None);
    }

    #[test]
    fn test_adopt_moves_to_the_returned_folder() {
        let (mut nav, fetch) = Navigator::new("/foo/bar/bar.jpg");
        nav.contents_loaded(&fetch, bar_folder());

        // A delete of bar.jpg answered with the parent folder's listing
        let mut confirmed = bar_folder();
        confirmed.files.remove(1);
        nav.adopt(confirmed.clone());

        assert_eq!(nav.view_path(), "/foo/bar/");
        assert_eq!(nav.transition(), Some(Transition::Backward));
        assert_eq!(nav.folder().contents(), Some(&confirmed));
        assert_eq!(nav.current_photo(), None);
        assert!(!nav.is_loading());
    }
}
