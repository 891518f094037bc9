/// Path identity and breadcrumb derivation
///
/// Paths are slash-separated strings, always rooted: "/" is the root, a
/// trailing slash denotes a folder, anything else denotes a file. These are
/// pure functions with no side effects.

/// A named, navigable prefix of the current path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// Normalize a path to carry exactly one leading slash
///
/// Server listings sometimes produce entry paths without one; comparisons
/// and URL building always go through this.
pub fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Whether a path denotes a folder (empty string and "/" both mean root)
pub fn is_folder_path(path: &str) -> bool {
    path.is_empty() || path.ends_with('/')
}

/// The folder whose listing must be loaded to display a path
///
/// Identity for folder paths; the parent folder (with trailing slash) for
/// file paths.
pub fn containing_folder(path: &str) -> String {
    let path = rooted(path);
    if is_folder_path(&path) {
        return path;
    }
    match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => "/".to_string(),
    }
}

/// Build the breadcrumb trail for a path
///
/// The first crumb is always Home. A folder path yields one crumb per
/// segment, each crumb's path being the slash-joined prefix with a trailing
/// slash. A file path additionally ends with a crumb for the file itself,
/// without a trailing slash.
pub fn breadcrumbs_for(path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        name: "Home".to_string(),
        path: "/".to_string(),
    }];

    let folder = is_folder_path(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut prefix = String::from("/");
    for (index, segment) in segments.iter().enumerate() {
        prefix.push_str(segment);
        let last = index + 1 == segments.len();
        if !last || folder {
            prefix.push('/');
        }
        crumbs.push(Crumb {
            name: (*segment).to_string(),
            path: prefix.clone(),
        });
    }

    crumbs
}
