//! Navigation history integration.
//!
//! The router never manipulates the document directly. It records every
//! navigation through a [`History`] implementation, which in a browser wraps
//! `pushState`/`replaceState`/`go` and everywhere else is a
//! [`MemoryHistory`].
//!
//! Entries are app-relative location strings (`/listen/42?autoplay=1`). The
//! base path the app is mounted under is not part of the entries; it is only
//! used to build `href`s.

mod memory;

pub use memory::MemoryHistory;

/// An integration with some kind of navigation history.
///
/// Implementations should mimic a web browser: pushing discards forward
/// entries, moving past either end of the stack does nothing.
pub trait History {
    /// The current entry.
    ///
    /// **Must start** with `/`. **Must not contain** the base path.
    ///
    /// ```rust
    /// # use keepsake_router::history::{History, MemoryHistory};
    /// let mut history = MemoryHistory::default();
    /// assert_eq!(history.current(), "/");
    ///
    /// history.push("/record".to_string());
    /// assert_eq!(history.current(), "/record");
    /// ```
    #[must_use]
    fn current(&self) -> String;

    /// Base path the application is mounted under, e.g. `/app`.
    fn base(&self) -> Option<&str> {
        None
    }

    /// Add a new entry after the current one and make it current.
    ///
    /// All forward entries are discarded.
    fn push(&mut self, location: String);

    /// Overwrite the current entry without adding a new one.
    fn replace(&mut self, location: String);

    /// Move the cursor by `delta` entries, clamped to the ends of the stack.
    ///
    /// Returns the number of entries actually moved (negative for backwards).
    fn go(&mut self, delta: isize) -> isize;

    /// Check whether there is an earlier entry.
    #[must_use]
    fn can_go_back(&self) -> bool;

    /// Check whether there is a later entry.
    #[must_use]
    fn can_go_forward(&self) -> bool;

    /// Total number of entries, current included.
    #[must_use]
    fn len(&self) -> usize;

    /// Always false: a history holds at least its current entry.
    #[must_use]
    fn is_empty(&self) -> bool {
        false
    }

    /// Go back one entry. Does nothing at the start of the stack.
    ///
    /// ```rust
    /// # use keepsake_router::history::{History, MemoryHistory};
    /// let mut history = MemoryHistory::default();
    /// assert!(!history.back());
    /// assert_eq!(history.current(), "/");
    ///
    /// history.push("/login".to_string());
    /// assert!(history.back());
    /// assert_eq!(history.current(), "/");
    /// ```
    fn back(&mut self) -> bool {
        self.go(-1) != 0
    }

    /// Go forward one entry. Does nothing at the end of the stack.
    fn forward(&mut self) -> bool {
        self.go(1) != 0
    }
}
