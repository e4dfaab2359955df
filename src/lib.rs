//! Trie-based HTTP request router and the engine that serves it.

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::EngineConfig;
pub use context::{PathParams, RequestContext};
pub use http::Engine;
pub use lifecycle::Shutdown;
pub use routing::{Method, Router, RouterError};
