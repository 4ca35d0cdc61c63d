//! Deferred view loaders.
//!
//! # Responsibilities
//! - Produce a view asynchronously on demand
//! - Report retrieval failures as `LoadError`
//!
//! # Design Decisions
//! - Loaders are stateless; memoization lives in `LazyView`
//! - `ChunkLoader` reads a pre-built view chunk from disk with `tokio::fs`

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::views::view::{StaticView, ViewHandle};

/// Errors that can occur while retrieving a deferred view.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The view chunk could not be read.
    #[error("failed to read view chunk {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The view chunk was readable but empty.
    #[error("view chunk {0:?} is empty")]
    EmptyChunk(PathBuf),

    /// The loader reported a failure of its own.
    #[error("view loader failed: {0}")]
    Failed(String),
}

/// A zero-argument async operation that produces a view.
pub trait ViewLoader: Send + Sync + fmt::Debug {
    fn load(&self) -> BoxFuture<'_, Result<ViewHandle, LoadError>>;
}

/// Loader wrapping an async closure.
pub struct FnLoader<F> {
    label: &'static str,
    f: F,
}

impl<F, Fut> FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ViewHandle, LoadError>> + Send + 'static,
{
    pub fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").field("label", &self.label).finish()
    }
}

impl<F, Fut> ViewLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ViewHandle, LoadError>> + Send + 'static,
{
    fn load(&self) -> BoxFuture<'_, Result<ViewHandle, LoadError>> {
        (self.f)().boxed()
    }
}

/// Loads a view from `<dir>/<chunk>.html`.
#[derive(Debug, Clone)]
pub struct ChunkLoader {
    path: PathBuf,
    view_name: String,
    title: String,
}

impl ChunkLoader {
    pub fn new(dir: &Path, chunk: &str, view_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: dir.join(format!("{chunk}.html")),
            view_name: view_name.into(),
            title: title.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ViewLoader for ChunkLoader {
    fn load(&self) -> BoxFuture<'_, Result<ViewHandle, LoadError>> {
        async move {
            let body = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| LoadError::Io {
                    path: self.path.clone(),
                    source,
                })?;

            if body.trim().is_empty() {
                return Err(LoadError::EmptyChunk(self.path.clone()));
            }

            tracing::debug!(path = ?self.path, bytes = body.len(), "View chunk read");
            Ok(StaticView::new(self.view_name.clone(), self.title.clone(), body).into_handle())
        }
        .boxed()
    }
}
