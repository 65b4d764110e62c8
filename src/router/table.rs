//! Ordered, validated route tables.
//!
//! A table is built once from an ordered list of [`Route`] declarations and
//! never changes afterwards. Construction rejects tables that cannot be
//! routed correctly (bad pattern syntax, duplicate patterns, duplicate names)
//! and records softer problems, such as routes shadowed by an earlier broader
//! pattern, as [`LintIssue`]s.

use super::pattern::{MatchOptions, Params, RoutePattern};
use crate::error::{RouteError, TableError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A route declaration: pattern, view and optional name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<V> {
    /// Pattern string, e.g. `/listen/:id`
    pub pattern: String,
    /// View rendered when the pattern matches
    pub view: V,
    /// Unique name for reverse lookups
    pub name: Option<String>,
}

impl<V> Route<V> {
    /// Declare an unnamed route
    pub fn new(pattern: impl Into<String>, view: V) -> Self {
        Self {
            pattern: pattern.into(),
            view,
            name: None,
        }
    }

    /// Give the route a name usable with [`RouteTable::reverse`]
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Result of successfully resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<V> {
    /// The view bound to the matched route
    pub view: V,
    /// Pattern of the matched route as declared
    pub pattern: Arc<str>,
    /// Name of the matched route, if it has one
    pub name: Option<Arc<str>>,
    /// Captured parameters in pattern order
    pub params: Params,
}

impl<V> Resolved<V> {
    /// Get a captured parameter by name
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Copy the parameters into a map
    ///
    /// Allocates; prefer [`Resolved::param`] for single lookups.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// The route table works but some routes behave unexpectedly
    Warning,
    /// Suggestion only
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A problem found in a route table that does not prevent building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Pattern the issue is about, or `table` for table-wide issues
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Machine-readable kind (`shadowed_route`, `missing_root`, `empty_table`)
    pub kind: &'static str,
    /// Human-readable description
    pub message: String,
    /// Optional suggestion for fixing it
    pub suggestion: Option<String>,
}

impl LintIssue {
    fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            severity,
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    pattern: RoutePattern,
    text: Arc<str>,
    view: V,
    name: Option<Arc<str>>,
}

/// Ordered route table; the first matching route wins
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    entries: Vec<Entry<V>>,
    names: HashMap<Arc<str>, usize>,
    options: MatchOptions,
    issues: Vec<LintIssue>,
}

impl<V> RouteTable<V> {
    /// Compile and validate an ordered list of routes
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidPattern`] for a pattern that does not parse
    /// - [`TableError::DuplicatePattern`] when two patterns have the same shape
    /// - [`TableError::DuplicateName`] when two routes share a name
    ///
    /// Shadowed routes are not errors; they are logged and available from
    /// [`RouteTable::lint`].
    pub fn new(routes: Vec<Route<V>>, options: MatchOptions) -> Result<Self, TableError> {
        let mut entries: Vec<Entry<V>> = Vec::with_capacity(routes.len());
        let mut shapes: HashMap<String, usize> = HashMap::with_capacity(routes.len());
        let mut names: HashMap<Arc<str>, usize> = HashMap::new();

        for route in routes {
            let pattern = RoutePattern::parse(&route.pattern, options)?;

            let shape = pattern.shape();
            if let Some(&previous) = shapes.get(&shape) {
                return Err(TableError::DuplicatePattern {
                    pattern: route.pattern,
                    previous: entries[previous].pattern.as_str().to_string(),
                });
            }
            shapes.insert(shape, entries.len());

            let name: Option<Arc<str>> = route.name.map(Arc::from);
            if let Some(name) = &name {
                if names.insert(Arc::clone(name), entries.len()).is_some() {
                    return Err(TableError::DuplicateName {
                        name: name.to_string(),
                    });
                }
            }

            entries.push(Entry {
                text: Arc::from(route.pattern),
                pattern,
                view: route.view,
                name,
            });
        }

        let issues = Self::collect_issues(&entries);
        for issue in issues.iter().filter(|i| i.severity == LintSeverity::Warning) {
            warn!(
                route_pattern = %issue.location,
                kind = issue.kind,
                "{}",
                issue.message
            );
        }

        let routes_summary: Vec<&str> = entries.iter().take(10).map(|e| e.text.as_ref()).collect();
        info!(
            routes_count = entries.len(),
            case_sensitive = options.case_sensitive,
            strict = options.strict,
            routes_summary = ?routes_summary,
            "Route table loaded"
        );

        Ok(Self {
            entries,
            names,
            options,
            issues,
        })
    }

    fn collect_issues(entries: &[Entry<V>]) -> Vec<LintIssue> {
        let mut issues = Vec::new();

        if entries.is_empty() {
            issues.push(LintIssue::new(
                "table",
                LintSeverity::Warning,
                "empty_table",
                "route table has no routes; every path resolves to NotFound",
            ));
            return issues;
        }

        for (i, later) in entries.iter().enumerate() {
            if let Some(earlier) = entries[..i].iter().find(|e| e.pattern.covers(&later.pattern)) {
                issues.push(
                    LintIssue::new(
                        later.text.as_ref(),
                        LintSeverity::Warning,
                        "shadowed_route",
                        format!(
                            "route '{}' is unreachable: every path it matches is taken by earlier route '{}'",
                            later.text, earlier.text
                        ),
                    )
                    .with_suggestion(format!(
                        "declare '{}' before '{}'",
                        later.text, earlier.text
                    )),
                );
            }
        }

        if !entries.iter().any(|e| e.pattern.matches("/").is_some()) {
            issues.push(
                LintIssue::new(
                    "table",
                    LintSeverity::Info,
                    "missing_root",
                    "no route matches '/'",
                )
                .with_suggestion("declare a route for '/' (landing or login view)"),
            );
        }

        issues
    }

    /// Lint issues found while building the table
    #[must_use]
    pub fn lint(&self) -> &[LintIssue] {
        &self.issues
    }

    /// Matching options the table was compiled with
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Number of routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no routes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate routes in declaration order as `(pattern, view, name)`
    pub fn routes(&self) -> impl Iterator<Item = (&str, &V, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.text.as_ref(), &e.view, e.name.as_deref()))
    }

    /// Build the path for a named route
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownRoute`] if no route has this name,
    /// [`RouteError::MissingParam`] if a parameter has no (non-empty) value.
    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let index = self
            .names
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::UnknownRoute {
                name: name.to_string(),
            })?;

        self.entries[index]
            .pattern
            .build(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param: param.to_string(),
            })
    }
}

impl<V: Clone> RouteTable<V> {
    /// Find the first route matching `path`
    ///
    /// `path` is a bare path; query strings and fragments must already be
    /// stripped (see [`Location`](crate::Location)).
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Resolved<V>> {
        for entry in &self.entries {
            if let Some(params) = entry.pattern.matches(path) {
                debug!(
                    path = %path,
                    route_pattern = %entry.text,
                    path_params = ?params,
                    "Route matched"
                );
                return Some(Resolved {
                    view: entry.view.clone(),
                    pattern: Arc::clone(&entry.text),
                    name: entry.name.clone(),
                    params,
                });
            }
        }
        None
    }
}

/// One line per route in declaration order, after a summary line
impl<V: fmt::Display> fmt::Display for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[routes] count={} case_sensitive={} strict={}",
            self.entries.len(),
            self.options.case_sensitive,
            self.options.strict
        )?;
        for entry in &self.entries {
            match &entry.name {
                Some(name) => writeln!(f, "[route] {} -> {} ({name})", entry.text, entry.view)?,
                None => writeln!(f, "[route] {} -> {}", entry.text, entry.view)?,
            }
        }
        Ok(())
    }
}
