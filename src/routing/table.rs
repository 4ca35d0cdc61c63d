//! Immutable route table.
//!
//! # Responsibilities
//! - Validate the declared routes once, at construction
//! - Index routes by normalized path and by name
//! - Resolve paths and names without allocation on the hot path
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Declaration order is preserved for listing
//! - No catch-all: an unknown path resolves to `None`

use std::collections::HashMap;
use thiserror::Error;

use crate::history::location::normalize_path;
use crate::routing::route::Route;
use crate::views::Component;

/// A problem with the declared routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route path {0:?} must start with '/'")]
    PathNotAbsolute(String),

    #[error("route {0:?} has an empty name")]
    EmptyName(String),

    #[error("duplicate route path {0:?}")]
    DuplicatePath(String),

    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    #[error("no route is mounted at '/'")]
    MissingRoot,
}

/// Ordered, validated, immutable collection of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Match an app-relative path exactly (after normalization).
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let idx = match self.by_path.get(path) {
            Some(idx) => *idx,
            None => *self.by_path.get(&normalize_path(path))?,
        };
        self.routes.get(idx)
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).and_then(|idx| self.routes.get(*idx))
    }

    pub fn root(&self) -> Option<&Route> {
        self.resolve("/")
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects route declarations and validates them on `build`.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Declare a route. Absolute paths are normalized ("/about/" → "/about").
    pub fn route(mut self, path: &str, name: &str, component: Component) -> Self {
        let path = if path.starts_with('/') {
            normalize_path(path)
        } else {
            path.to_string()
        };
        self.routes.push(Route::new(path, name, component));
        self
    }

    pub fn build(self) -> Result<RouteTable, Vec<TableError>> {
        let mut errors = Vec::new();
        let mut by_path = HashMap::new();
        let mut by_name = HashMap::new();

        for (idx, route) in self.routes.iter().enumerate() {
            if !route.path().starts_with('/') {
                errors.push(TableError::PathNotAbsolute(route.path().to_string()));
            }
            if route.name().trim().is_empty() {
                errors.push(TableError::EmptyName(route.path().to_string()));
            }
            if by_path.insert(route.path().to_string(), idx).is_some() {
                errors.push(TableError::DuplicatePath(route.path().to_string()));
            }
            if by_name.insert(route.name().to_string(), idx).is_some() {
                errors.push(TableError::DuplicateName(route.name().to_string()));
            }
        }

        if !by_path.contains_key("/") {
            errors.push(TableError::MissingRoot);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        tracing::debug!(routes = self.routes.len(), "Route table compiled");
        Ok(RouteTable {
            routes: self.routes,
            by_path,
            by_name,
        })
    }
}
