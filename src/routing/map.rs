//! Exact-match router.
//!
//! Keys handlers by method and normalized path. No parameters, no
//! wildcards; `:id` and `*` are plain literals here.

use std::collections::HashMap;

use crate::context::RequestContext;
use crate::routing::path::split_segments;
use crate::routing::{Method, RouterError, Routes};

#[derive(Debug, Clone)]
pub struct MapRouter<H> {
    handlers: HashMap<(Method, String), H>,
}

impl<H> Default for MapRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    format!("/{}", split_segments(path).join("/"))
}

impl<H> MapRouter<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Routes<H> for MapRouter<H> {
    fn add_route(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        let method: Method = method.parse()?;
        self.handlers.insert((method, normalize(pattern)), handler);
        Ok(())
    }

    fn resolve(
        &self,
        method: &str,
        path: &str,
        _ctx: &mut RequestContext,
    ) -> Result<&H, RouterError> {
        let parsed: Method = method.parse()?;
        self.handlers
            .get(&(parsed, normalize(path)))
            .ok_or_else(|| RouterError::not_found(method, path))
    }
}
