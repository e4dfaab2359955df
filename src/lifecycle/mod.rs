//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Register routes → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Routes are registered before the listener is bound, so lookups never
//!   race registration
//! - Shutdown has timeout: in-flight requests are dropped after the deadline

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
