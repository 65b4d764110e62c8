use std::collections::VecDeque;

use super::History;

/// A [`History`] that keeps all entries in memory.
///
/// Used by tests, the CLI and hosts without a browser history. Entries are
/// split into a back stack, the current entry and a forward stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    current: String,
    back: VecDeque<String>,
    forward: Vec<String>,
    base: Option<String>,
    limit: Option<usize>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use keepsake_router::history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/login");
    /// assert_eq!(history.current(), "/login");
    /// assert!(!history.can_go_back());
    /// ```
    pub fn with_initial_path(path: impl Into<String>) -> Self {
        Self {
            current: path.into(),
            back: VecDeque::new(),
            forward: Vec::new(),
            base: None,
            limit: None,
        }
    }

    /// Set the base path used for `href`s. A trailing `/` is dropped.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        let base = base.trim_end_matches('/');
        self.base = (!base.is_empty()).then(|| base.to_string());
        self
    }

    /// Keep at most `max_entries` entries; the oldest back entries are dropped first.
    ///
    /// A limit of `0` is treated as `1` (only the current entry).
    #[must_use]
    pub fn with_limit(mut self, max_entries: usize) -> Self {
        self.limit = Some(max_entries.max(1));
        self.enforce_limit();
        self
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            while self.len() > limit && self.back.pop_front().is_some() {}
        }
    }

    /// Zero-based index of the current entry.
    #[must_use]
    pub fn position(&self) -> usize {
        self.back.len()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        self.back
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.current.as_str()))
            .chain(self.forward.iter().rev().map(String::as_str))
            .collect()
    }
}

impl History for MemoryHistory {
    fn current(&self) -> String {
        self.current.clone()
    }

    fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    fn push(&mut self, location: String) {
        let old = std::mem::replace(&mut self.current, location);
        self.back.push_back(old);
        self.forward.clear();
        self.enforce_limit();
    }

    fn replace(&mut self, location: String) {
        self.current = location;
    }

    fn go(&mut self, delta: isize) -> isize {
        let mut moved = 0;
        if delta < 0 {
            while moved > delta {
                let Some(previous) = self.back.pop_back() else {
                    break;
                };
                let old = std::mem::replace(&mut self.current, previous);
                self.forward.push(old);
                moved -= 1;
            }
        } else {
            while moved < delta {
                let Some(next) = self.forward.pop() else {
                    break;
                };
                let old = std::mem::replace(&mut self.current, next);
                self.back.push_back(old);
                moved += 1;
            }
        }
        moved
    }

    fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    fn len(&self) -> usize {
        self.back.len() + 1 + self.forward.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_clears_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push("/login".to_string());
        history.push("/dashboard".to_string());
        assert!(history.back());
        assert!(history.can_go_forward());

        history.push("/record".to_string());
        assert!(!history.can_go_forward());
        assert_eq!(history.entries(), vec!["/", "/login", "/record"]);
    }

    #[test]
    fn test_back_and_forward_at_boundaries() {
        let mut history = MemoryHistory::default();
        assert!(!history.back());
        assert!(!history.forward());
        assert_eq!(history.current(), "/");

        history.push("/login".to_string());
        assert!(!history.forward());
        assert!(history.back());
        assert!(!history.back());
        assert!(history.forward());
        assert_eq!(history.current(), "/login");
    }

    #[test]
    fn test_go_is_clamped() {
        let mut history = MemoryHistory::default();
        for path in ["/a", "/b", "/c"] {
            history.push(path.to_string());
        }
        assert_eq!(history.go(-10), -3);
        assert_eq!(history.current(), "/");
        assert_eq!(history.position(), 0);

        assert_eq!(history.go(2), 2);
        assert_eq!(history.current(), "/b");
        assert_eq!(history.go(5), 1);
        assert_eq!(history.current(), "/c");
        assert_eq!(history.go(0), 0);
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::default();
        history.push("/login".to_string());
        history.replace("/dashboard".to_string());
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries(), vec!["/", "/dashboard"]);
    }

    #[test]
    fn test_limit_drops_oldest_entries() {
        let mut history = MemoryHistory::default().with_limit(3);
        for path in ["/a", "/b", "/c", "/d"] {
            history.push(path.to_string());
        }
        assert_eq!(history.entries(), vec!["/b", "/c", "/d"]);
        assert_eq!(history.go(-5), -2);
        assert_eq!(history.current(), "/b");
    }

    #[test]
    fn test_base_trailing_slash_dropped() {
        let history = MemoryHistory::default().with_base("/app/");
        assert_eq!(history.base(), Some("/app"));
        let history = MemoryHistory::default().with_base("/");
        assert_eq!(history.base(), None);
    }
}
