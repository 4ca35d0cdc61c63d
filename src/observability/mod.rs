//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (navigation and view-load counters)
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → any recorder installed through the `metrics` facade
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (route, navigation id, outcome)
//! - Each navigation carries a v4 UUID through its span
//! - Metrics are no-ops until the host installs a recorder

pub mod logging;
pub mod metrics;
