//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (assign request ID)
//!     → server.rs dispatch (fresh RequestContext, trie lookup)
//!     → registered handler, or 404 on any routing error
//!     → response.rs helpers build the reply
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{handler, Engine, Handler};
