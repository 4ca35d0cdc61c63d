//! Route components and the memoizing lazy cell.
//!
//! # State Machine
//! ```text
//! Eager:  Loaded
//! Lazy:   Unloaded ──get()──▶ Loading ──ok──▶ Loaded   (terminal)
//!                               │  └──err──▶ Failed ──get()──▶ Loading
//!                               └─cancelled─▶ previous state (Unloaded or Failed)
//! ```
//!
//! One load runs at a time. Callers that queued behind a load receive its
//! outcome, success or failure, instead of starting their own.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::observability::metrics;
use crate::views::loader::{LoadError, ViewLoader};
use crate::views::view::ViewHandle;

/// Observable load state of a route component.
#[derive(Debug, Clone)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed(Arc<LoadError>),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Unloaded => "unloaded",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}

enum Cell {
    Unloaded,
    Loading,
    Loaded(ViewHandle),
    Failed(Arc<LoadError>),
}

struct Slot {
    cell: Cell,
    /// Loads that ran to completion, successful or not.
    finished: u64,
}

/// Restores the pre-load state if the loading future is dropped.
struct LoadingGuard<'a> {
    slot: &'a Mutex<Slot>,
    previous: Option<Cell>,
}

impl LoadingGuard<'_> {
    fn finish(mut self, cell: Cell) {
        self.previous = None;
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.cell = cell;
        slot.finished += 1;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if matches!(slot.cell, Cell::Loading) {
                slot.cell = previous;
            }
        }
    }
}

/// A deferred view, loaded at most once.
pub struct LazyView {
    loader: Box<dyn ViewLoader>,
    slot: Mutex<Slot>,
    permit: tokio::sync::Mutex<()>,
    loads: AtomicUsize,
}

impl LazyView {
    pub fn new(loader: impl ViewLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: Mutex::new(Slot {
                cell: Cell::Unloaded,
                finished: 0,
            }),
            permit: tokio::sync::Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the view, invoking the loader only if nothing is cached yet.
    ///
    /// Concurrent callers during a load wait for it and share its result.
    /// Dropping the returned future mid-load abandons that attempt.
    pub async fn get(&self, route: &str) -> Result<ViewHandle, Arc<LoadError>> {
        let observed = {
            let slot = self.slot();
            if let Cell::Loaded(view) = &slot.cell {
                return Ok(view.clone());
            }
            slot.finished
        };

        let _permit = self.permit.lock().await;

        let previous = {
            let mut slot = self.slot();
            match &slot.cell {
                Cell::Loaded(view) => return Ok(view.clone()),
                // The load we queued behind failed.
                Cell::Failed(e) if slot.finished != observed => return Err(e.clone()),
                _ => {}
            }
            std::mem::replace(&mut slot.cell, Cell::Loading)
        };
        let guard = LoadingGuard {
            slot: &self.slot,
            previous: Some(previous),
        };

        self.loads.fetch_add(1, Ordering::SeqCst);
        let started = Instant::now();
        tracing::debug!(route = %route, "Loading deferred view");

        let result = self.loader.load().await;
        metrics::record_view_load(route, result.is_ok(), started);

        match result {
            Ok(view) => {
                guard.finish(Cell::Loaded(view.clone()));
                tracing::info!(route = %route, view = %view.name(), elapsed = ?started.elapsed(), "Deferred view loaded");
                Ok(view)
            }
            Err(e) => {
                let e = Arc::new(e);
                tracing::warn!(route = %route, error = %e, "Deferred view failed to load");
                guard.finish(Cell::Failed(e.clone()));
                Err(e)
            }
        }
    }

    /// Cached view, if loaded.
    pub fn cached(&self) -> Option<ViewHandle> {
        match &self.slot().cell {
            Cell::Loaded(view) => Some(view.clone()),
            _ => None,
        }
    }

    /// Number of times the loader has been invoked.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> LoadState {
        match &self.slot().cell {
            Cell::Unloaded => LoadState::Unloaded,
            Cell::Loading => LoadState::Loading,
            Cell::Loaded(_) => LoadState::Loaded,
            Cell::Failed(e) => LoadState::Failed(e.clone()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("loader", &self.loader)
            .field("state", &self.state().label())
            .field("loads", &self.load_count())
            .finish()
    }
}

/// How a route obtains its view.
#[derive(Debug)]
pub enum Component {
    /// Available immediately.
    Eager(ViewHandle),
    /// Retrieved on first navigation, then cached.
    Lazy(LazyView),
}

impl Component {
    pub fn lazy(loader: impl ViewLoader + 'static) -> Self {
        Component::Lazy(LazyView::new(loader))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Component::Lazy(_))
    }

    pub fn state(&self) -> LoadState {
        match self {
            Component::Eager(_) => LoadState::Loaded,
            Component::Lazy(lazy) => lazy.state(),
        }
    }

    /// Resolve the view, awaiting a deferred load when needed.
    pub async fn resolve(&self, route: &str) -> Result<ViewHandle, Arc<LoadError>> {
        match self {
            Component::Eager(view) => Ok(view.clone()),
            Component::Lazy(lazy) => lazy.get(route).await,
        }
    }

    /// Loader invocations so far (always 0 for eager components).
    pub fn load_count(&self) -> usize {
        match self {
            Component::Eager(_) => 0,
            Component::Lazy(lazy) => lazy.load_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::loader::FnLoader;
    use crate::views::view::StaticView;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    fn counting_loader(calls: Arc<AtomicU32>, fail_first: u32) -> FnLoader<impl Fn() -> BoxFuture<'static, Result<ViewHandle, LoadError>> + Send + Sync> {
        FnLoader::new("test", move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                if n < fail_first {
                    Err(LoadError::Failed("chunk unavailable".into()))
                } else {
                    Ok(StaticView::new("TestView", "Test", "").into_handle())
                }
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn test_loads_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let lazy = LazyView::new(counting_loader(calls.clone(), 0));
        assert!(matches!(lazy.state(), LoadState::Unloaded));

        lazy.get("test").await.unwrap();
        lazy.get("test").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lazy.load_count(), 1);
        assert!(lazy.state().is_loaded());
    }

    #[tokio::test]
    async fn test_concurrent_first_access_shares_load() {
        let calls = Arc::new(AtomicU32::new(0));
        let lazy = Arc::new(LazyView::new(counting_loader(calls.clone(), 0)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = lazy.clone();
                tokio::spawn(async move { lazy.get("test").await.map(|v| v.name().to_string()) })
            })
            .collect();
        for h in handles {
            assert_eq!(h.await.unwrap().unwrap(), "TestView");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_then_next_access_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let lazy = LazyView::new(counting_loader(calls.clone(), 1));

        let err = lazy.get("test").await.unwrap_err();
        assert!(matches!(*err, LoadError::Failed(_)));
        assert!(matches!(lazy.state(), LoadState::Failed(_)));
        assert!(lazy.cached().is_none());

        lazy.get("test").await.unwrap();
        assert!(lazy.state().is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    fn slow_loader(calls: Arc<AtomicU32>, delay: Duration, fail: bool) -> impl ViewLoader {
        FnLoader::new("slow", move || -> BoxFuture<'static, Result<ViewHandle, LoadError>> {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                if fail {
                    Err(LoadError::Failed("chunk unavailable".into()))
                } else {
                    Ok(StaticView::new("SlowView", "Slow", "").into_handle())
                }
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn test_cancelled_load_restores_state() {
        let calls = Arc::new(AtomicU32::new(0));
        let lazy = LazyView::new(slow_loader(calls.clone(), Duration::from_secs(10), false));

        let attempt = tokio::time::timeout(Duration::from_millis(20), lazy.get("slow")).await;
        assert!(attempt.is_err());

        assert!(matches!(lazy.state(), LoadState::Unloaded));
        assert!(lazy.cached().is_none());
        assert_eq!(lazy.load_count(), 1);

        // The abandoned attempt released its permit.
        let attempt = tokio::time::timeout(Duration::from_millis(20), lazy.get("slow")).await;
        assert!(attempt.is_err());
        assert_eq!(lazy.load_count(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_retry_keeps_previous_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let lazy = LazyView::new(FnLoader::new("flaky", move || -> BoxFuture<'static, Result<ViewHandle, LoadError>> {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n > 0 {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
                Err(LoadError::Failed("chunk unavailable".into()))
            }
            .boxed()
        }));

        lazy.get("flaky").await.unwrap_err();
        let attempt = tokio::time::timeout(Duration::from_millis(20), lazy.get("flaky")).await;
        assert!(attempt.is_err());

        assert!(matches!(lazy.state(), LoadState::Failed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_waiters_share_a_failed_load() {
        let calls = Arc::new(AtomicU32::new(0));
        let lazy = Arc::new(LazyView::new(slow_loader(calls.clone(), Duration::from_millis(50), true)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = lazy.clone();
                tokio::spawn(async move { lazy.get("slow").await.map(|v| v.name().to_string()) })
            })
            .collect();
        for h in handles {
            let err = h.await.unwrap().unwrap_err();
            assert!(matches!(*err, LoadError::Failed(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(lazy.state(), LoadState::Failed(_)));

        // A caller arriving after the failure starts a fresh attempt.
        lazy.get("slow").await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_eager_component_never_loads() {
        let component = Component::Eager(StaticView::new("HomeView", "Home", "").into_handle());
        assert!(component.state().is_loaded());
        component.resolve("home").await.unwrap();
        assert_eq!(component.load_count(), 0);
        assert!(!component.is_lazy());
    }
}
