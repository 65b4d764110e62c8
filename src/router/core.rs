//! Router core: resolution, navigation and the current navigation state.

use super::table::{Resolved, RouteTable};
use crate::error::RouteError;
use crate::history::{History, MemoryHistory};
use crate::location::Location;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The currently active location and what it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState<V> {
    location: Location,
    resolved: Option<Resolved<V>>,
}

impl<V> NavigationState<V> {
    /// The active location
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The active path (no query or fragment)
    #[must_use]
    pub fn path(&self) -> &str {
        self.location.path()
    }

    /// The resolution of the active path, `None` if no route matched
    #[must_use]
    pub fn resolved(&self) -> Option<&Resolved<V>> {
        self.resolved.as_ref()
    }

    /// The active view, `None` if no route matched
    #[must_use]
    pub fn view(&self) -> Option<&V> {
        self.resolved.as_ref().map(|r| &r.view)
    }

    /// Get a captured path parameter of the active route
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.resolved.as_ref().and_then(|r| r.param(name))
    }

    /// Get a query parameter of the active location
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.location.query_param(name)
    }

    /// True when the active path did not match any route
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.resolved.is_none()
    }
}

/// What caused a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// A new history entry was pushed
    Push,
    /// The current history entry was overwritten
    Replace,
    /// The history cursor moved by `delta` entries (`0` re-resolves in place)
    Traverse {
        /// Entries moved, negative for backwards
        delta: isize,
    },
}

/// Passed to navigation listeners after the state has been updated
#[derive(Debug)]
pub struct NavigationEvent<'a, V> {
    /// What caused the navigation
    pub kind: NavigationKind,
    /// The location that was active before
    pub from: &'a Location,
    /// The new state
    pub to: &'a NavigationState<V>,
}

type Listener<V> = Box<dyn FnMut(&NavigationEvent<'_, V>)>;

/// Resolves locations against a [`RouteTable`] and tracks navigation history
///
/// The router is constructed explicitly and handed to whoever needs to
/// navigate; there is no global instance. All navigation goes through
/// `&mut self`, so one navigation always completes (history updated, state
/// resolved, listeners notified) before the next one starts.
///
/// # Example
///
/// ```rust
/// use keepsake_router::{MatchOptions, Route, RouteTable, Router};
/// use keepsake_router::history::MemoryHistory;
/// use std::sync::Arc;
///
/// let table = RouteTable::new(
///     vec![Route::new("/", "landing"), Route::new("/listen/:id", "public")],
///     MatchOptions::default(),
/// )?;
/// let mut router = Router::new(Arc::new(table), MemoryHistory::default())?;
///
/// router.navigate("/listen/42")?;
/// assert_eq!(router.current().view(), Some(&"public"));
/// assert_eq!(router.param("id"), Some("42"));
///
/// router.back();
/// assert_eq!(router.current().view(), Some(&"landing"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Router<V, H = MemoryHistory> {
    table: Arc<RouteTable<V>>,
    history: H,
    state: NavigationState<V>,
    listeners: Vec<Listener<V>>,
}

impl<V: std::fmt::Debug, H: std::fmt::Debug> std::fmt::Debug for Router<V, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("history", &self.history)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<V: Clone, H: History> Router<V, H> {
    /// Create a router and resolve the history's current entry
    ///
    /// An initial entry that matches no route is not an error; the state
    /// simply has no view. Check [`NavigationState::is_not_found`].
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidPath`] if the history's current entry is not an
    /// absolute path.
    pub fn new(table: Arc<RouteTable<V>>, history: H) -> Result<Self, RouteError> {
        let location = Location::parse(&history.current())?;
        let resolved = table.match_path(location.path());
        if resolved.is_none() {
            warn!(path = %location.path(), "Initial location matches no route");
        }
        Ok(Self {
            table,
            history,
            state: NavigationState { location, resolved },
            listeners: Vec::new(),
        })
    }

    /// Resolve a location without navigating
    ///
    /// Never touches the navigation state or history; calling it repeatedly
    /// returns the same result.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPath`] if `path` is not an absolute path
    /// - [`RouteError::NotFound`] if no route matches
    pub fn resolve(&self, path: &str) -> Result<Resolved<V>, RouteError> {
        let location = Location::parse(path)?;
        debug!(path = %location.path(), "Route match attempt");
        self.table.match_path(location.path()).ok_or_else(|| {
            warn!(path = %location.path(), "No route matched");
            RouteError::NotFound {
                path: location.path().to_string(),
            }
        })
    }

    /// Push a new history entry and activate the view it resolves to
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPath`]: nothing changes
    /// - [`RouteError::NotFound`]: the entry is still pushed and the state
    ///   records the unmatched location; the host picks a fallback view
    pub fn navigate(&mut self, path: &str) -> Result<(), RouteError> {
        let location = Location::parse(path)?;
        self.history.push(location.to_string());
        self.activate(location, NavigationKind::Push)
    }

    /// Like [`Router::navigate`] but overwrites the current history entry
    ///
    /// # Errors
    ///
    /// Same as [`Router::navigate`].
    pub fn replace(&mut self, path: &str) -> Result<(), RouteError> {
        let location = Location::parse(path)?;
        self.history.replace(location.to_string());
        self.activate(location, NavigationKind::Replace)
    }

    /// Build the path of a named route and navigate to it
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownRoute`] or [`RouteError::MissingParam`] from the
    /// reverse lookup (nothing changes), otherwise as [`Router::navigate`].
    pub fn navigate_named(&mut self, name: &str, params: &[(&str, &str)]) -> Result<(), RouteError> {
        let path = self.table.reverse(name, params)?;
        self.navigate(&path)
    }

    /// Go back one entry; returns `false` (and does nothing) at the start of history
    pub fn back(&mut self) -> bool {
        self.go(-1) != 0
    }

    /// Go forward one entry; returns `false` (and does nothing) at the end of history
    pub fn forward(&mut self) -> bool {
        self.go(1) != 0
    }

    /// Move `delta` entries through history, clamped to its ends
    ///
    /// Returns the number of entries actually moved. The view is re-resolved
    /// when the cursor moved, and also for `go(0)`.
    ///
    /// A history entry that is not a valid location (possible with a custom
    /// [`History`]) is not entered: the cursor is moved back and `0` returned.
    pub fn go(&mut self, delta: isize) -> isize {
        let moved = self.history.go(delta);
        if moved == 0 && delta != 0 {
            debug!(delta, "History boundary reached; navigation ignored");
            return 0;
        }

        let entry = self.history.current();
        let location = match Location::parse(&entry) {
            Ok(location) => location,
            Err(err) => {
                let restored = self.history.go(-moved);
                warn!(
                    entry = %entry,
                    error = %err,
                    moved,
                    restored,
                    "History entry is not a valid location; navigation ignored"
                );
                return 0;
            }
        };

        // Unmatched entries are recorded in the state; traversal has no caller to report to.
        if let Err(err) = self.activate(location, NavigationKind::Traverse { delta: moved }) {
            debug!(error = %err, "Traversed to unmatched history entry");
        }
        moved
    }

    /// Check whether [`Router::back`] would move
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Check whether [`Router::forward`] would move
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn activate(&mut self, location: Location, kind: NavigationKind) -> Result<(), RouteError> {
        let resolved = self.table.match_path(location.path());
        let not_found = resolved.is_none().then(|| RouteError::NotFound {
            path: location.path().to_string(),
        });

        let previous = std::mem::replace(&mut self.state, NavigationState { location, resolved });

        match self.state.resolved() {
            Some(resolved) => info!(
                kind = ?kind,
                from = %previous.location,
                to = %self.state.location,
                route_pattern = %resolved.pattern,
                "Navigation"
            ),
            None => warn!(
                kind = ?kind,
                from = %previous.location,
                to = %self.state.location,
                "Navigation to unmatched location"
            ),
        }

        let event = NavigationEvent {
            kind,
            from: &previous.location,
            to: &self.state,
        };
        for listener in &mut self.listeners {
            listener(&event);
        }

        not_found.map_or(Ok(()), Err)
    }
}

impl<V, H: History> Router<V, H> {
    /// Register a listener called after every navigation
    ///
    /// This is where the host activates the new view. Listeners run in
    /// registration order.
    pub fn on_navigate(&mut self, listener: impl FnMut(&NavigationEvent<'_, V>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The current navigation state
    #[must_use]
    pub fn current(&self) -> &NavigationState<V> {
        &self.state
    }

    /// Get a captured path parameter of the current route
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.state.param(name)
    }

    /// Get a query parameter of the current location
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.state.query(name)
    }

    /// Prefix an app-relative path with the history's base path
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        match self.history.base() {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }

    /// The route table
    #[must_use]
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// The underlying history
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }
}
