//! Host environment port
//!
//! All ambient host state - reading the current address, writing history
//! entries - sits behind the [`HostEnvironment`] trait, injected into the
//! navigator at construction. This keeps the core deterministic and testable
//! without a real browser.
//!
//! The addressing scheme is hash-fragment based ("#/users/7"), which allows
//! deployment without server-side route configuration. Host navigation events
//! (back/forward) re-enter the navigator through
//! [`Navigator::handle_history_change`](crate::Navigator::handle_history_change)
//! with history pushing disabled, since the host already recorded that entry.
//!
//! [`MemoryHost`] is a complete in-process implementation backed by a linear
//! history stack, suitable for tests, demos, and non-browser embeddings.

/// Injected port to the host's address and history facilities
pub trait HostEnvironment {
    /// Read the host's current address fragment, as-is
    ///
    /// The navigator normalizes the returned value with [`normalize_path`];
    /// implementations may return the raw fragment including a leading `#`.
    fn current_path(&self) -> String;

    /// Write one history entry associating a uniqueness token with a path
    ///
    /// Called exactly once per committed push-navigation. Never called for
    /// cancelled navigations or for transitions the host itself initiated.
    fn push_state(&mut self, token: u64, path: &str);
}

/// Normalize a raw host address fragment into a path
///
/// Strips one leading `#`, lowercases (hash addressing is treated as
/// case-insensitive), and falls back to `/` when nothing remains.
///
/// # Example
///
/// ```
/// use hash_navigator::normalize_path;
///
/// assert_eq!(normalize_path("#/Users/7"), "/users/7");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("#"), "/");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let path = raw.strip_prefix('#').unwrap_or(raw);
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_lowercase()
    }
}

/// One entry in the in-memory history stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Uniqueness token assigned by the navigator at push time
    pub token: u64,
    /// Path for this history entry
    pub path: String,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(token: u64, path: impl Into<String>) -> Self {
        Self {
            token,
            path: path.into(),
        }
    }
}

/// In-memory host environment with a single linear history stack
///
/// # Example
///
/// ```
/// use hash_navigator::{HostEnvironment, MemoryHost};
///
/// let mut host = MemoryHost::new();
/// host.push_state(1, "/users/");
/// host.push_state(2, "/users/7/");
///
/// assert_eq!(host.current_path(), "/users/7/");
/// assert_eq!(host.back(), Some("/users/"));
/// assert_eq!(host.forward(), Some("/users/7/"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHost {
    /// History stack, oldest first
    entries: Vec<HistoryEntry>,
    /// Current position in the stack
    current: usize,
    /// Maximum history size (0 = unlimited)
    max_size: usize,
}

impl MemoryHost {
    /// Create a host positioned at `/`
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create with a custom history limit
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(0, "/")],
            current: 0,
            max_size,
        }
    }

    /// Move back one entry, returning the path now current
    ///
    /// The returned path should be replayed through the navigator's
    /// `handle_history_change` so the resolution state follows the host.
    pub fn back(&mut self) -> Option<&str> {
        if self.can_go_back() {
            self.current -= 1;
            Some(&self.entries[self.current].path)
        } else {
            None
        }
    }

    /// Move forward one entry, returning the path now current
    pub fn forward(&mut self) -> Option<&str> {
        if self.can_go_forward() {
            self.current += 1;
            Some(&self.entries[self.current].path)
        } else {
            None
        }
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current < self.entries.len() - 1
    }

    /// Reset to a single entry
    pub fn clear(&mut self, path: impl Into<String>) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(0, path));
        self.current = 0;
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty (never true in practice)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position in the stack
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Enforce the maximum size limit, keeping the current entry reachable
    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

impl HostEnvironment for MemoryHost {
    fn current_path(&self) -> String {
        self.entries[self.current].path.clone()
    }

    fn push_state(&mut self, token: u64, path: &str) {
        // Pushing discards any forward history
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry::new(token, path));
        self.current += 1;

        self.enforce_size_limit();
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}
