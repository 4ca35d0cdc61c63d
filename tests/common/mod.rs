//! Shared utilities for integration tests.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::path::PathBuf;
use std::time::Duration;

use trainer_router::history::WebHistory;
use trainer_router::routing::{RouteTable, Router};
use trainer_router::views::{Component, FnLoader, LoadError, StaticView, ViewHandle};

/// A loader that counts calls and fails the first `failures` of them.
#[allow(dead_code)]
pub fn flaky_component(
    calls: Arc<AtomicU32>,
    failures: u32,
) -> Component {
    Component::lazy(FnLoader::new("flaky", move || -> BoxFuture<'static, Result<ViewHandle, LoadError>> {
        let calls = calls.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if n < failures {
                Err(LoadError::Failed("network unreachable".into()))
            } else {
                Ok(StaticView::new("ReportView", "Report", "").into_handle())
            }
        }
        .boxed()
    }))
}

/// A loader that takes `delay` to produce its view.
#[allow(dead_code)]
pub fn slow_component(delay: Duration) -> Component {
    Component::lazy(FnLoader::new("slow", move || async move {
        tokio::time::sleep(delay).await;
        Ok(StaticView::new("SlowView", "Slow", "").into_handle())
    }))
}

/// Router with an eager home and one extra route.
#[allow(dead_code)]
pub fn router_with(path: &str, name: &str, component: Component) -> Router {
    let table = RouteTable::builder()
        .route(
            "/",
            "home",
            Component::Eager(StaticView::new("HomeView", "Home", "").into_handle()),
        )
        .route(path, name, component)
        .build()
        .unwrap();
    Router::new(table, WebHistory::new("/"))
}

/// Router with an eager home and one flaky lazy route at `/report`.
#[allow(dead_code)]
pub fn flaky_router(calls: Arc<AtomicU32>, failures: u32) -> Router {
    router_with("/report", "report", flaky_component(calls, failures))
}

/// Create a fresh directory under the system temp dir.
#[allow(dead_code)]
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trainer_router_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
