//! The keepsake app's canonical route table.
//!
//! Earlier revisions of the front end disagreed on which view owns `/` and
//! whether `/login` existed. This table is the one the app ships: the
//! landing page owns `/`, `/login` is declared, and there is no catch-all,
//! so unknown paths surface as `NotFound` to the host.

use crate::error::TableError;
use crate::router::{MatchOptions, Route, RouteTable};
use crate::view::ViewId;
use std::fmt;
use std::str::FromStr;

/// The pages of the keepsake app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepsakeView {
    /// Marketing landing page
    Landing,
    /// Signed-in overview of recorded keepsakes
    Dashboard,
    /// Sign-in form
    Login,
    /// Record a new keepsake
    Record,
    /// Public playback page; unlocks a keepsake with its PIN
    Public,
}

impl KeepsakeView {
    /// All views in table order
    pub const ALL: [KeepsakeView; 5] = [
        KeepsakeView::Landing,
        KeepsakeView::Dashboard,
        KeepsakeView::Login,
        KeepsakeView::Record,
        KeepsakeView::Public,
    ];

    /// Lowercase identifier used in configuration files
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KeepsakeView::Landing => "landing",
            KeepsakeView::Dashboard => "dashboard",
            KeepsakeView::Login => "login",
            KeepsakeView::Record => "record",
            KeepsakeView::Public => "public",
        }
    }
}

impl fmt::Display for KeepsakeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeepsakeView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeepsakeView::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown keepsake view '{s}'"))
    }
}

impl From<KeepsakeView> for ViewId {
    fn from(view: KeepsakeView) -> Self {
        ViewId::new(view.as_str())
    }
}

/// Route declarations of the keepsake app, in match order
#[must_use]
pub fn routes() -> Vec<Route<KeepsakeView>> {
    vec![
        Route::new("/", KeepsakeView::Landing).named("landing"),
        Route::new("/dashboard", KeepsakeView::Dashboard).named("dashboard"),
        Route::new("/login", KeepsakeView::Login).named("login"),
        Route::new("/record", KeepsakeView::Record).named("record"),
        Route::new("/listen/:id", KeepsakeView::Public).named("listen"),
    ]
}

/// Build the keepsake route table
///
/// # Errors
///
/// Never fails for the shipped declarations; the `Result` comes from
/// [`RouteTable::new`].
pub fn table(options: MatchOptions) -> Result<RouteTable<KeepsakeView>, TableError> {
    RouteTable::new(routes(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keepsake_table_resolves_every_page() {
        let table = table(MatchOptions::default()).unwrap();
        let cases = [
            ("/", KeepsakeView::Landing),
            ("/dashboard", KeepsakeView::Dashboard),
            ("/login", KeepsakeView::Login),
            ("/record", KeepsakeView::Record),
            ("/listen/42", KeepsakeView::Public),
        ];
        for (path, view) in cases {
            assert_eq!(table.match_path(path).unwrap().view, view, "path {path}");
        }
        assert!(table.match_path("/unregistered").is_none());
    }

    #[test]
    fn test_keepsake_table_is_clean() {
        let table = table(MatchOptions::default()).unwrap();
        assert!(table.lint().is_empty(), "{:?}", table.lint());
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("public".parse::<KeepsakeView>(), Ok(KeepsakeView::Public));
        assert_eq!("Landing".parse::<KeepsakeView>(), Ok(KeepsakeView::Landing));
        assert!("hero".parse::<KeepsakeView>().is_err());
    }
}
