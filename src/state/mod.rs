/// Navigation and content-synchronization state
///
/// This module holds the application's core state machine:
/// - Path and breadcrumb derivation (path.rs)
/// - Previous/current/next photo adjacency (adjacency.rs)
/// - The authoritative folder snapshot (folder.rs)
/// - The navigation controller (nav.rs)
/// - Pending mutation prompts and their reconciliation (mutation.rs)

pub mod adjacency;
pub mod folder;
pub mod mutation;
pub mod nav;
pub mod path;
