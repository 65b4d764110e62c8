//! Parsed navigation locations.
//!
//! A location string as handed to the router (`/listen/42?autoplay=1#t=10`)
//! is split into its path, decoded query pairs and fragment. Only the path
//! takes part in route matching.

use crate::error::RouteError;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// A location inside the application: path, query pairs and fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

impl Location {
    /// Parse an app-relative location string
    ///
    /// An empty path is treated as `/`. Anything else must start with `/`;
    /// relative paths and absolute URLs are rejected with
    /// [`RouteError::InvalidPath`].
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, frag)) => (rest, Some(frag.to_string())),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        let path = if path.is_empty() { "/" } else { path };
        if !path.starts_with('/') || path.starts_with("//") {
            return Err(RouteError::InvalidPath {
                path: input.to_string(),
            });
        }

        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            path: path.to_string(),
            query,
            fragment,
        })
    }

    /// The path component, always starting with `/`
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded query pairs in the order they appeared
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get a query parameter by name
    ///
    /// Uses "last write wins" semantics for repeated keys (`?t=1&t=2` gives `2`).
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The fragment without the leading `#`
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl FromStr for Location {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(f, "?{encoded}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_only() {
        let loc = Location::parse("/record").unwrap();
        assert_eq!(loc.path(), "/record");
        assert!(loc.query().is_empty());
        assert_eq!(loc.fragment(), None);
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let loc = Location::parse("/listen/42?autoplay=1&from=mail%20link#t=10").unwrap();
        assert_eq!(loc.path(), "/listen/42");
        assert_eq!(loc.query_param("autoplay"), Some("1"));
        assert_eq!(loc.query_param("from"), Some("mail link"));
        assert_eq!(loc.fragment(), Some("t=10"));
    }

    #[test]
    fn test_repeated_query_key_last_wins() {
        let loc = Location::parse("/?t=1&t=2").unwrap();
        assert_eq!(loc.query_param("t"), Some("2"));
        assert_eq!(loc.query().len(), 2);
    }

    #[test]
    fn test_empty_path_is_root() {
        assert_eq!(Location::parse("").unwrap().path(), "/");
        assert_eq!(Location::parse("?x=1").unwrap().path(), "/");
    }

    #[test]
    fn test_relative_and_absolute_urls_rejected() {
        assert!(matches!(
            Location::parse("listen/42"),
            Err(RouteError::InvalidPath { .. })
        ));
        assert!(Location::parse("https://example.com/").is_err());
        assert!(Location::parse("//example.com/").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let loc = Location::parse("/listen/42?autoplay=1#t").unwrap();
        assert_eq!(loc.to_string(), "/listen/42?autoplay=1#t");
        assert_eq!(Location::parse(&loc.to_string()).unwrap(), loc);
    }
}
