//! View components and lazy loading.
//!
//! # Data Flow
//! ```text
//! Route.component
//!     → Component::Eager(ViewHandle)        (available immediately)
//!     → Component::Lazy(LazyView)
//!         → first access: ViewLoader::load() (async, awaited by navigation)
//!         → state slot stores the ViewHandle
//!         → later accesses: cached handle, loader never called again
//! ```
//!
//! # Design Decisions
//! - View internals are opaque; the router only mounts a handle
//! - A lazy cell is write-once; concurrent accesses share one load and its outcome
//! - Failures are recorded but not cached; a later access starts over
//! - A dropped load restores the previous state

pub mod lazy;
pub mod loader;
pub mod view;

pub use lazy::{Component, LazyView, LoadState};
pub use loader::{ChunkLoader, FnLoader, LoadError, ViewLoader};
pub use view::{StaticView, View, ViewHandle};
