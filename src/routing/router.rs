//! Navigation service.
//!
//! # Responsibilities
//! - Resolve navigation targets (path or name) against the route table
//! - Mount the target view, awaiting a deferred load on first visit
//! - Commit the move to the history and publish the current route
//!
//! # Design Decisions
//! - A navigation only takes effect once its view is available; a failed
//!   load or an unmatched target leaves history and current route untouched
//! - Navigating to the location already shown is reported as `Duplicated`
//! - The history lock is never held across an await point
//! - History and the current route are updated under the same lock

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::history::{Location, WebHistory};
use crate::observability::metrics;
use crate::routing::route::{Route, RouteTarget};
use crate::routing::table::RouteTable;
use crate::views::{LoadError, LoadState, ViewHandle};

/// Errors returned by navigation operations.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No declared route matches the target.
    #[error("no route matches {0}")]
    NoMatch(String),

    /// A full URL does not lie under the router's base path.
    #[error("{url} is outside the base path {base}")]
    OutsideBase { url: String, base: String },

    /// The target's deferred view could not be loaded.
    #[error("failed to load view for route {route:?}")]
    Load {
        route: String,
        #[source]
        source: Arc<LoadError>,
    },

    /// back/forward/go moved past either end of the history.
    #[error("no history entry {0} step(s) from the current one")]
    HistoryBounds(isize),
}

/// The route currently mounted.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentRoute {
    pub navigation_id: Uuid,
    pub name: String,
    pub path: String,
    pub location: Location,
    pub href: String,
    pub view_name: String,
    #[serde(skip_serializing)]
    pub view: ViewHandle,
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    Navigated(CurrentRoute),
    /// The target is the location already shown; nothing changed.
    Duplicated,
}

impl NavigationOutcome {
    pub fn route(&self) -> Option<&CurrentRoute> {
        match self {
            NavigationOutcome::Navigated(current) => Some(current),
            NavigationOutcome::Duplicated => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Commit {
    Push,
    Replace,
    Jump { index: usize, delta: isize },
}

/// Client-side router bound to a route table and a web history.
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    history: Mutex<WebHistory>,
    current: watch::Sender<Option<CurrentRoute>>,
}

impl Router {
    pub fn new(table: RouteTable, history: WebHistory) -> Self {
        let (current, _) = watch::channel(None);
        tracing::info!(base = %history.base(), routes = table.len(), "Router created");
        Self {
            table,
            history: Mutex::new(history),
            current,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn base(&self) -> String {
        self.history().base().to_string()
    }

    /// Match an app-relative path to a declared route.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let location = Location::parse(path)?;
        self.table.resolve(&location.path)
    }

    /// Resolve a target to its route and the location it would show.
    pub fn resolve_target(&self, target: &RouteTarget) -> Result<(&Route, Location), NavigationError> {
        let no_match = || NavigationError::NoMatch(target.to_string());
        match target {
            RouteTarget::Path(path) => {
                let location = Location::parse(path).ok_or_else(no_match)?;
                let route = self.table.resolve(&location.path).ok_or_else(no_match)?;
                Ok((route, location))
            }
            RouteTarget::Name(name) => {
                let route = self.table.by_name(name).ok_or_else(no_match)?;
                Ok((route, Location::from_path(route.path())))
            }
        }
    }

    /// Base-prefixed URL for a target.
    pub fn href_for(&self, target: &RouteTarget) -> Result<String, NavigationError> {
        let (_, location) = self.resolve_target(target)?;
        Ok(self.history().href(&location))
    }

    /// Load state of a route's component.
    pub fn load_state(&self, name: &str) -> Option<LoadState> {
        self.table.by_name(name).map(|r| r.component().state())
    }

    /// Location at the history cursor.
    pub fn location(&self) -> Option<Location> {
        self.history().current().cloned()
    }

    pub fn current(&self) -> Option<CurrentRoute> {
        self.current.borrow().clone()
    }

    /// Reactive view of the current route.
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentRoute>> {
        self.current.subscribe()
    }

    /// Initial navigation from the URL the application was opened at.
    pub async fn start(&self, url: &str) -> Result<NavigationOutcome, NavigationError> {
        let location = {
            let history = self.history();
            history.strip_base(url).ok_or_else(|| NavigationError::OutsideBase {
                url: url.to_string(),
                base: history.base().to_string(),
            })?
        };
        self.navigate(RouteTarget::Path(location.full_path()), Commit::Replace).await
    }

    pub async fn push(&self, target: impl Into<RouteTarget>) -> Result<NavigationOutcome, NavigationError> {
        self.navigate(target.into(), Commit::Push).await
    }

    pub async fn replace(&self, target: impl Into<RouteTarget>) -> Result<NavigationOutcome, NavigationError> {
        self.navigate(target.into(), Commit::Replace).await
    }

    pub async fn back(&self) -> Result<NavigationOutcome, NavigationError> {
        self.go(-1).await
    }

    pub async fn forward(&self) -> Result<NavigationOutcome, NavigationError> {
        self.go(1).await
    }

    /// Move `delta` entries through the history and mount the route found there.
    pub async fn go(&self, delta: isize) -> Result<NavigationOutcome, NavigationError> {
        let (index, location) = {
            let history = self.history();
            let (index, location) = history
                .peek(delta)
                .ok_or(NavigationError::HistoryBounds(delta))?;
            (index, location.clone())
        };
        if delta == 0 {
            return Ok(NavigationOutcome::Duplicated);
        }
        self.navigate(RouteTarget::Path(location.full_path()), Commit::Jump { index, delta })
            .await
    }

    async fn navigate(&self, target: RouteTarget, commit: Commit) -> Result<NavigationOutcome, NavigationError> {
        let navigation_id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", id = %navigation_id, target = %target);

        async move {
            let (route, location) = match self.resolve_target(&target) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(error = %e, "Navigation target not found");
                    metrics::record_navigation("none", "no_match");
                    return Err(e);
                }
            };

            let is_duplicate = matches!(commit, Commit::Push | Commit::Replace)
                && self.history().current() == Some(&location);
            if is_duplicate {
                tracing::debug!(route = %route.name(), "Already at target location");
                metrics::record_navigation(route.name(), "duplicated");
                return Ok(NavigationOutcome::Duplicated);
            }

            let view = match route.component().resolve(route.name()).await {
                Ok(view) => view,
                Err(source) => {
                    metrics::record_navigation(route.name(), "load_failed");
                    return Err(NavigationError::Load {
                        route: route.name().to_string(),
                        source,
                    });
                }
            };

            // History and the published route change under one lock so
            // concurrent navigations publish in the order they commit.
            let current = {
                let mut history = self.history();
                match commit {
                    Commit::Push => history.push(location.clone()),
                    Commit::Replace => history.replace(location.clone()),
                    Commit::Jump { index, delta } => {
                        // The stack may have been rewritten by a push while this view loaded.
                        if history.entry(index) != Some(&location) || !history.jump_to(index) {
                            tracing::warn!(index, "History entry changed before commit");
                            metrics::record_navigation(route.name(), "history_bounds");
                            return Err(NavigationError::HistoryBounds(delta));
                        }
                    }
                }

                let current = CurrentRoute {
                    navigation_id,
                    name: route.name().to_string(),
                    path: route.path().to_string(),
                    href: history.href(&location),
                    location,
                    view_name: view.name().to_string(),
                    view,
                };
                self.current.send_replace(Some(current.clone()));
                current
            };

            tracing::info!(route = %current.name, href = %current.href, "Navigated");
            metrics::record_navigation(route.name(), "navigated");
            Ok(NavigationOutcome::Navigated(current))
        }
        .instrument(span)
        .await
    }

    fn history(&self) -> MutexGuard<'_, WebHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
