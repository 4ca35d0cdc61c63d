//! Parsed app-relative locations.

use serde::Serialize;
use std::fmt;
use url::Url;

/// An app-relative location: normalized path plus optional query and hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl Location {
    /// Parse a location such as `/training/?step=2#top`.
    ///
    /// Relative input is taken relative to the root. Returns `None` for input
    /// that is not a path (for example an absolute URL with another scheme).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        // Only input that parses without a base is an absolute URL; a URL
        // inside the query or hash of a path does not count.
        if Url::parse(input).is_ok() {
            return None;
        }

        // Collapse slashes up front so "//x" is not read as a host.
        let collapsed = collapse_slashes(input);
        let root = Url::parse("http://localhost/").ok()?;
        let url = root.join(&collapsed).ok()?;

        Some(Self {
            path: normalize_path(url.path()),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
            hash: url.fragment().filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    /// Location for a bare path with no query or hash.
    pub fn from_path(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            query: None,
            hash: None,
        }
    }

    /// Path, query and hash joined back together.
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if let Some(q) = &self.query {
            out.push('?');
            out.push_str(q);
        }
        if let Some(h) = &self.hash {
            out.push('#');
            out.push_str(h);
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Normalize a route path: leading slash, no repeated or trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let trimmed = collapse_slashes(path);
    let trimmed = trimmed.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn collapse_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_slash = false;
    for c in input.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("training"), "/training");
        assert_eq!(normalize_path("/training/"), "/training");
        assert_eq!(normalize_path("//training//x"), "/training/x");
    }

    #[test]
    fn test_parse_with_query_and_hash() {
        let loc = Location::parse("/simulation/?speed=2#chart").unwrap();
        assert_eq!(loc.path, "/simulation");
        assert_eq!(loc.query.as_deref(), Some("speed=2"));
        assert_eq!(loc.hash.as_deref(), Some("chart"));
        assert_eq!(loc.full_path(), "/simulation?speed=2#chart");
    }

    #[test]
    fn test_parse_double_slash_is_not_a_host() {
        let loc = Location::parse("//about").unwrap();
        assert_eq!(loc.path, "/about");
    }

    #[test]
    fn test_parse_rejects_absolute_urls() {
        assert!(Location::parse("https://example.com/about").is_none());
    }

    #[test]
    fn test_parse_keeps_url_valued_query() {
        let loc = Location::parse("/training?next=https://x.y/z#from=http://a.b").unwrap();
        assert_eq!(loc.path, "/training");
        assert_eq!(loc.query.as_deref(), Some("next=https://x.y/z"));
        assert_eq!(loc.hash.as_deref(), Some("from=http://a.b"));
    }

    #[test]
    fn test_path_is_case_sensitive() {
        assert_eq!(Location::parse("/About").unwrap().path, "/About");
    }
}
