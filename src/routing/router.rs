//! Route registration and lookup.
//!
//! # Responsibilities
//! - Own one routing tree per supported method
//! - Insert patterns, sharing prefixes with already registered routes
//! - Resolve (method, path) to a handler and captured parameters
//!
//! # Design Decisions
//! - Registration happens before serving; lookups only read the trees,
//!   so a built `Router` can sit behind an `Arc` without locks
//! - Re-registering a pattern replaces its handler (last write wins)
//! - Interior nodes that no route ends at are not matches

use std::collections::HashMap;

use crate::context::{PathParams, RequestContext};
use crate::routing::node::Node;
use crate::routing::path::{split_segments, validate_pattern};
use crate::routing::{Method, RouterError};

/// A successful lookup.
#[derive(Debug)]
pub struct Match<'a, H> {
    pub handler: &'a H,
    pub params: PathParams,
}

/// Registration and lookup shared by the router implementations.
pub trait Routes<H> {
    fn add_route(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError>;

    /// Resolve a request, writing captured parameters into `ctx`.
    fn resolve(&self, method: &str, path: &str, ctx: &mut RequestContext)
        -> Result<&H, RouterError>;
}

/// Trie router with one tree per method.
#[derive(Debug, Clone)]
pub struct Router<H> {
    forest: HashMap<Method, Node<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create a router with an empty tree for every supported method.
    pub fn new() -> Self {
        let forest = Method::ALL
            .into_iter()
            .map(|method| (method, Node::root(method.as_str())))
            .collect();
        Self { forest }
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// Fails with [`RouterError::InvalidPattern`] before looking at the
    /// method, then with [`RouterError::UnsupportedMethod`].
    pub fn add_route(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        let segments = pattern_segments(pattern)?;
        let method: Method = method.parse()?;
        self.insert(method, pattern, &segments, handler)
    }

    /// Register a route for an already parsed method.
    pub fn route(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError> {
        let segments = pattern_segments(pattern)?;
        self.insert(method, pattern, &segments, handler)
    }

    /// Descend while an existing child matches the next segment, then
    /// append the remaining segments as a fresh chain.
    fn insert(
        &mut self,
        method: Method,
        pattern: &str,
        segments: &[&str],
        handler: H,
    ) -> Result<(), RouterError> {
        let mut current = self
            .forest
            .get_mut(&method)
            .ok_or_else(|| RouterError::UnsupportedMethod(method.to_string()))?;

        for (index, segment) in segments.iter().enumerate() {
            if let Some(child) = current.insertion_child(segment) {
                current = current.child_mut(child);
                continue;
            }

            current.add_child(&segments[index..], handler);
            tracing::debug!(method = %method, pattern, "Route registered");
            return Ok(());
        }

        if current.is_terminal() {
            tracing::debug!(method = %method, pattern, "Route handler replaced");
        } else {
            tracing::debug!(method = %method, pattern, "Route registered");
        }
        current.set_handler(handler);
        Ok(())
    }

    pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.route(Method::Get, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.route(Method::Post, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.route(Method::Put, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.route(Method::Delete, pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.route(Method::Patch, pattern, handler)
    }

    /// Root of the tree for `method`.
    pub fn tree(&self, method: Method) -> Option<&Node<H>> {
        self.forest.get(&method)
    }

    /// Find the handler for a request without touching any context.
    pub fn lookup(&self, method: &str, path: &str) -> Result<Match<'_, H>, RouterError> {
        let root = method
            .parse::<Method>()
            .ok()
            .and_then(|m| self.forest.get(&m))
            .ok_or_else(|| RouterError::UnsupportedMethod(method.to_string()))?;

        let mut params = PathParams::new();
        let mut current = root;
        for segment in split_segments(path) {
            current = current
                .find_child(segment, Some(&mut params))
                .ok_or_else(|| RouterError::not_found(method, path))?;
        }

        match current.handler() {
            Some(handler) => Ok(Match { handler, params }),
            None => Err(RouterError::not_found(method, path)),
        }
    }

    /// Resolve a request and record its captured parameters in `ctx`.
    ///
    /// Parameters are only written when the lookup succeeds.
    pub fn resolve(
        &self,
        method: &str,
        path: &str,
        ctx: &mut RequestContext,
    ) -> Result<&H, RouterError> {
        let Match { handler, params } = self.lookup(method, path)?;
        ctx.path_params.extend(params);
        Ok(handler)
    }

    /// Resolve using the method and path carried by `ctx`.
    pub fn dispatch(&self, ctx: &mut RequestContext) -> Result<&H, RouterError> {
        let Match { handler, params } = self.lookup(&ctx.method, &ctx.path)?;
        ctx.path_params.extend(params);
        Ok(handler)
    }

    /// Every registered (method, pattern), in method order.
    pub fn routes(&self) -> Vec<(Method, String)> {
        Method::ALL
            .into_iter()
            .filter_map(|method| self.forest.get(&method).map(|root| (method, root)))
            .flat_map(|(method, root)| root.routes().into_iter().map(move |p| (method, p)))
            .collect()
    }
}

/// Validate `pattern` and split it into non-empty segments.
fn pattern_segments(pattern: &str) -> Result<Vec<&str>, RouterError> {
    validate_pattern(pattern)?;
    let segments = split_segments(pattern);
    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == ":")
    {
        return Err(RouterError::InvalidPattern(pattern.to_string()));
    }
    Ok(segments)
}

impl<H> Routes<H> for Router<H> {
    fn add_route(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        Router::add_route(self, method, pattern, handler)
    }

    fn resolve(
        &self,
        method: &str,
        path: &str,
        ctx: &mut RequestContext,
    ) -> Result<&H, RouterError> {
        Router::resolve(self, method, path, ctx)
    }
}
