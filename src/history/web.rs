//! Native URL history bound to a base path.

use crate::history::location::{normalize_path, Location};

/// Entry stack with a cursor, mirroring the browser's session history.
#[derive(Debug, Clone)]
pub struct WebHistory {
    base: String,
    entries: Vec<Location>,
    index: usize,
}

impl WebHistory {
    /// Create an empty history served under `base`.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: Vec::new(),
            index: 0,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full URL (base-prefixed) for an app location.
    pub fn href(&self, location: &Location) -> String {
        let mut out = if location.path == "/" {
            self.base.clone()
        } else {
            format!("{}{}", self.base.trim_end_matches('/'), location.path)
        };
        if let Some(q) = &location.query {
            out.push('?');
            out.push_str(q);
        }
        if let Some(h) = &location.hash {
            out.push('#');
            out.push_str(h);
        }
        out
    }

    /// Turn a full URL back into an app location; `None` if it lies outside the base.
    pub fn strip_base(&self, url: &str) -> Option<Location> {
        let mut location = Location::parse(url)?;
        if self.base == "/" {
            return Some(location);
        }

        let prefix = self.base.trim_end_matches('/');
        let rest = location.path.strip_prefix(prefix)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            // "/trainerx" is not under "/trainer/".
            return None;
        }
        location.path = normalize_path(rest);
        Some(location)
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry after the cursor, discarding any forward entries.
    pub fn push(&mut self, location: Location) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the entry at the cursor (pushes if the history is empty).
    pub fn replace(&mut self, location: Location) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = location,
            None => self.push(location),
        }
    }

    pub fn entry(&self, index: usize) -> Option<&Location> {
        self.entries.get(index)
    }

    /// Look at the entry `delta` steps from the cursor without moving.
    pub fn peek(&self, delta: isize) -> Option<(usize, &Location)> {
        let target = self.index.checked_add_signed(delta)?;
        self.entries.get(target).map(|loc| (target, loc))
    }

    /// Move the cursor to an absolute entry index.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Move the cursor by `delta`; returns the new current entry.
    pub fn go(&mut self, delta: isize) -> Option<&Location> {
        let (target, _) = self.peek(delta)?;
        self.index = target;
        self.current()
    }
}

/// Normalize a base path to "/" or "/prefix/".
pub fn normalize_base(base: &str) -> String {
    let path = normalize_path(base.trim());
    if path == "/" {
        path
    } else {
        format!("{path}/")
    }
}
