//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation target (path or name)
//!     → table.rs (exact lookup on normalized path / name)
//!     → route.rs Component (eager view or lazy load)
//!     → router.rs (commit to history, publish CurrentRoute)
//!     → Return: NavigationOutcome or NavigationError
//!
//! Route Table Compilation (at startup):
//!     Route[]
//!     → Validate (unique paths, unique names, one root)
//!     → Index by path and by name
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Static paths only, matched exactly after normalization
//! - Deterministic: same input always matches same route
//! - Explicit NoMatch rather than a silent fallback route

pub mod route;
pub mod router;
pub mod table;

pub use route::{Route, RouteTarget};
pub use router::{CurrentRoute, NavigationError, NavigationOutcome, Router};
pub use table::{RouteTable, RouteTableBuilder, TableError};
