//! Route definitions and navigation targets.

use std::fmt;

use crate::views::Component;

/// A declarative mapping from a URL path and a name to a view.
#[derive(Debug)]
pub struct Route {
    path: String,
    name: String,
    component: Component,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, component: Component) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// Where a caller wants to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// An app-relative location, optionally with query and hash.
    Path(String),
    /// A route name.
    Name(String),
}

impl RouteTarget {
    pub fn path(path: impl Into<String>) -> Self {
        RouteTarget::Path(path.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        RouteTarget::Name(name.into())
    }

    /// Parse CLI-style input: `name:training` targets a name, anything else a path.
    pub fn parse(input: &str) -> Self {
        match input.strip_prefix("name:") {
            Some(name) => RouteTarget::Name(name.trim().to_string()),
            None => RouteTarget::Path(input.trim().to_string()),
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Path(p) => write!(f, "{p}"),
            RouteTarget::Name(n) => write!(f, "name:{n}"),
        }
    }
}

impl From<&str> for RouteTarget {
    fn from(s: &str) -> Self {
        RouteTarget::parse(s)
    }
}
