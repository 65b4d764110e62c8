//! Route pattern compilation and matching.
//!
//! Patterns are `/`-separated segments:
//!
//! - `record` matches the literal segment
//! - `:id` matches exactly one non-empty segment and captures it
//! - `*rest` captures everything that remains (possibly nothing); it must be
//!   the last segment
//!
//! Each pattern is compiled once into an anchored regex. Captured values are
//! percent-decoded; a capture that is not valid UTF-8 after decoding makes the
//! pattern a non-match instead of an error.

use crate::error::TableError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of captured parameters stored inline before spilling to
/// the heap. The keepsake routes capture at most one.
pub const MAX_INLINE_PARAMS: usize = 4;

/// Captured path parameters in pattern order.
///
/// Names are `Arc<str>` shared with the compiled pattern, so a match only
/// allocates the values.
pub type Params = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Table-wide matching options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare static segments case-sensitively (default: `false`)
    pub case_sensitive: bool,
    /// Treat `/record/` and `/record` as different paths (default: `false`)
    pub strict: bool,
}

/// One segment of a parsed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal segment text
    Static(String),
    /// `:name`, one captured segment
    Param(Arc<str>),
    /// `*name`, captures the remainder of the path
    CatchAll(Arc<str>),
}

/// A compiled route pattern
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    options: MatchOptions,
}

impl RoutePattern {
    /// Parse and compile a pattern string
    ///
    /// A single trailing slash in the pattern is ignored, so `/record/` and
    /// `/record` declare the same route.
    pub fn parse(raw: &str, options: MatchOptions) -> Result<Self, TableError> {
        let invalid = |reason: &str| TableError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let body = if raw.len() > 1 {
            raw.strip_suffix('/').unwrap_or(raw)
        } else {
            ""
        };

        let mut segments = Vec::new();
        let mut param_names: Vec<Arc<str>> = Vec::new();

        for part in body.split('/').skip(1) {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            if matches!(segments.last(), Some(Segment::CatchAll(_))) {
                return Err(invalid("catch-all segment must be the last segment"));
            }

            let segment = if let Some(name) = part.strip_prefix(':') {
                Segment::Param(Self::param_name(name).ok_or_else(|| {
                    invalid("parameter names must be identifiers like ':id'")
                })?)
            } else if let Some(name) = part.strip_prefix('*') {
                Segment::CatchAll(Self::param_name(name).ok_or_else(|| {
                    invalid("catch-all names must be identifiers like '*rest'")
                })?)
            } else {
                Segment::Static(part.to_string())
            };

            if let Segment::Param(name) | Segment::CatchAll(name) = &segment {
                if param_names.iter().any(|n| n == name) {
                    return Err(invalid(&format!("parameter '{name}' is declared twice")));
                }
                param_names.push(Arc::clone(name));
            }
            segments.push(segment);
        }

        let regex = Self::to_regex(&segments, options)
            .map_err(|e| invalid(&format!("failed to compile matcher: {e}")))?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            regex,
            param_names,
            options,
        })
    }

    fn param_name(name: &str) -> Option<Arc<str>> {
        let mut chars = name.chars();
        let first = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        Some(Arc::from(name))
    }

    /// Build the anchored regex for a segment list
    ///
    /// `/listen/:id` becomes `^/listen/([^/]+)/?$` (the `/?` is dropped in
    /// strict mode), `/files/*rest` becomes `^/files(?:/(.*))?$`.
    fn to_regex(segments: &[Segment], options: MatchOptions) -> Result<Regex, regex::Error> {
        let mut pattern = String::with_capacity(16 + segments.len() * 12);
        if !options.case_sensitive {
            pattern.push_str("(?i)");
        }
        pattern.push('^');

        if segments.is_empty() {
            pattern.push_str("/$");
            return Regex::new(&pattern);
        }

        for segment in segments {
            match segment {
                Segment::Static(text) => {
                    pattern.push('/');
                    pattern.push_str(&regex::escape(text));
                }
                Segment::Param(_) => pattern.push_str("/([^/]+)"),
                Segment::CatchAll(_) => pattern.push_str("(?:/(.*))?"),
            }
        }

        let ends_with_catch_all = matches!(segments.last(), Some(Segment::CatchAll(_)));
        if !options.strict && !ends_with_catch_all {
            pattern.push_str("/?");
        }
        pattern.push('$');
        Regex::new(&pattern)
    }

    /// Match a path (no query or fragment) against this pattern
    ///
    /// Returns the captured parameters on success.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        for (i, name) in self.param_names.iter().enumerate() {
            let raw = captures.get(i + 1).map_or("", |m| m.as_str());
            let value = urlencoding::decode(raw).ok()?;
            params.push((Arc::clone(name), value.into_owned()));
        }
        Some(params)
    }

    /// True when every path matched by `other` is also matched by `self`
    ///
    /// Both patterns are assumed to share the same [`MatchOptions`], which
    /// holds inside one table.
    #[must_use]
    pub fn covers(&self, other: &RoutePattern) -> bool {
        for (i, segment) in self.segments.iter().enumerate() {
            match (segment, other.segments.get(i)) {
                (Segment::CatchAll(_), _) => {
                    return other.segments[i..].iter().all(|s| match s {
                        Segment::Static(text) => urlencoding::decode(text).is_ok(),
                        Segment::Param(_) | Segment::CatchAll(_) => true,
                    })
                }
                (Segment::Param(_), Some(Segment::Param(_))) => {}
                // A capture that does not decode is a non-match, so such a static stays reachable
                (Segment::Param(_), Some(Segment::Static(b))) if urlencoding::decode(b).is_ok() => {}
                (Segment::Static(a), Some(Segment::Static(b))) if self.static_eq(a, b) => {}
                _ => return false,
            }
        }
        self.segments.len() == other.segments.len()
    }

    /// Shape of the pattern with parameter names erased
    ///
    /// `/listen/:id` and `/listen/:key` share the shape `/listen/:`.
    #[must_use]
    pub fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut shape = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            shape.push('/');
            match segment {
                Segment::Static(text) if self.options.case_sensitive => shape.push_str(text),
                Segment::Static(text) => shape.push_str(&text.to_lowercase()),
                Segment::Param(_) => shape.push(':'),
                Segment::CatchAll(_) => shape.push('*'),
            }
        }
        shape
    }

    /// Build a concrete path from parameter values
    ///
    /// Values are percent-encoded; a catch-all value keeps its `/`
    /// separators. Returns the name of the first parameter with no value.
    pub fn build(&self, params: &[(&str, &str)]) -> Result<String, Arc<str>> {
        let lookup = |name: &str| {
            params
                .iter()
                .rfind(|(k, _)| *k == name)
                .map(|(_, v)| *v)
        };

        let mut path = String::with_capacity(self.raw.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param(name) => {
                    let value = lookup(name.as_ref())
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| Arc::clone(name))?;
                    path.push('/');
                    path.push_str(&urlencoding::encode(value));
                }
                Segment::CatchAll(name) => {
                    let value = lookup(name.as_ref()).ok_or_else(|| Arc::clone(name))?;
                    for part in value.split('/').filter(|p| !p.is_empty()) {
                        path.push('/');
                        path.push_str(&urlencoding::encode(part));
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    fn static_eq(&self, a: &str, b: &str) -> bool {
        if self.options.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }

    /// The pattern as declared
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order (catch-all included)
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
