//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, pattern, handler)
//!     → path.rs (validate wildcard placement, split into segments)
//!     → router.rs (pick the method tree, merge shared prefixes)
//!     → node.rs (append a fresh chain for the unmatched tail)
//!
//! Incoming Request (method, path):
//!     → router.rs (pick the method tree, split path)
//!     → node.rs (most specific child per segment)
//!     → Return: handler + captured params, or NotFound
//! ```
//!
//! # Design Decisions
//! - One tree per supported method, built once and read-only afterwards
//! - Precedence is static > param > wildcard, independent of registration order
//! - No backtracking: each segment commits to its best child
//! - Captures are written into the per-request context, never onto nodes

pub mod error;
pub mod map;
pub mod method;
pub mod node;
pub mod path;
pub mod router;

pub use error::RouterError;
pub use map::MapRouter;
pub use method::Method;
pub use node::{Node, NodeKind, Specificity};
pub use router::{Match, Router, Routes};
