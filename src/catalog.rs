//! Well-known Git metadata paths probed on every scan.
//!
//! The list is fixed at compile time. Order is the order the console report
//! uses; scan results are keyed by path, so ordering carries no meaning for
//! correctness.

/// Candidate sub-paths under which Git metadata is commonly served by
/// misconfigured hosts.
pub const GIT_PATHS: [&str; 10] = [
    "/.git/",
    "/.git/HEAD",
    "/.git/config",
    "/.git/index",
    "/.git/logs/HEAD",
    "/.git/refs/heads/master",
    "/.git/refs/heads/main",
    "/.git/description",
    "/.git/hooks/",
    "/.git/info/exclude",
];
