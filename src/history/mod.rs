//! Browser-style navigation history.
//!
//! # Data Flow
//! ```text
//! full URL ("/trainer/training?step=2")
//!     → web.rs strip_base  → Location { path: "/training", query: "step=2" }
//!     → routing (match on path only)
//!     → web.rs push/replace → entry stack + cursor
//!     → web.rs href         → "/trainer/training?step=2"
//! ```
//!
//! # Design Decisions
//! - Native URL history: the route lives in the path, never in `#fragment`
//! - Base path is normalized once to "/", or "/prefix/"
//! - Cursor moves are validated before the router commits them

pub mod location;
pub mod web;

pub use location::Location;
pub use web::WebHistory;
