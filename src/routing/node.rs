//! Trie node.
//!
//! # Responsibilities
//! - Hold one segment of a registered pattern and its children
//! - Answer whether a request segment matches this node
//! - Pick the most specific matching child (static > param > wildcard)
//!
//! # Design Decisions
//! - Nodes are plain data: the match rule branches on [`NodeKind`]
//! - Captured parameters never live on the node; they go into a
//!   caller-owned [`PathParams`] so a built tree is shareable across requests

use crate::context::PathParams;
use crate::routing::path::{PARAM_PREFIX, WILDCARD};

/// What a node matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Per-method starting point; never matched against a segment.
    Root,
    /// Exact literal segment.
    Static(String),
    /// Any segment, captured under the given name.
    Param(String),
    /// Any non-empty segment, no capture.
    Wildcard,
}

/// Tie-break order between children matching the same segment.
///
/// Higher is more specific and wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    Wildcard,
    Param,
    Static,
}

impl NodeKind {
    fn from_pattern(pattern: &str) -> Self {
        if pattern == WILDCARD {
            NodeKind::Wildcard
        } else if let Some(name) = pattern.strip_prefix(PARAM_PREFIX) {
            NodeKind::Param(name.to_string())
        } else {
            NodeKind::Static(pattern.to_string())
        }
    }

    /// Specificity of this kind. The root is never a candidate.
    pub fn specificity(&self) -> Specificity {
        match self {
            NodeKind::Static(_) => Specificity::Static,
            NodeKind::Param(_) => Specificity::Param,
            NodeKind::Wildcard => Specificity::Wildcard,
            NodeKind::Root => unreachable!("root node is never a match candidate"),
        }
    }
}

/// One level of a method's routing tree.
#[derive(Debug, Clone)]
pub struct Node<H> {
    kind: NodeKind,
    pattern: String,
    children: Vec<Node<H>>,
    handler: Option<H>,
}

impl<H> Node<H> {
    /// Create the root of a method tree.
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Root,
            pattern: label.into(),
            children: Vec::new(),
            handler: None,
        }
    }

    /// Create a node for one pattern segment (`"blog"`, `":id"` or `"*"`).
    pub fn new(pattern: &str) -> Self {
        Self {
            kind: NodeKind::from_pattern(pattern),
            pattern: pattern.to_string(),
            children: Vec::new(),
            handler: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The raw segment this node was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Capture key for parameter nodes.
    pub fn param_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Param(name) => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node<H>] {
        &self.children
    }

    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// True iff some registered route ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.handler.is_some()
    }

    /// Bind (or re-bind) the handler, making this node terminal.
    pub fn set_handler(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// Whether a request segment matches this node.
    ///
    /// # Panics
    /// On the root node, which is only ever a starting point.
    pub fn matches(&self, segment: &str) -> bool {
        match &self.kind {
            NodeKind::Static(literal) => segment == literal && segment != WILDCARD,
            NodeKind::Param(_) => segment != WILDCARD,
            NodeKind::Wildcard => !segment.is_empty(),
            NodeKind::Root => panic!("root node `{}` must not be matched", self.pattern),
        }
    }

    fn best_child_index(&self, segment: &str) -> Option<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.matches(segment))
            .max_by_key(|(_, child)| child.kind.specificity())
            .map(|(index, _)| index)
    }

    /// Find the most specific child matching `segment`.
    ///
    /// When the selected child is a parameter node and `params` is given,
    /// the segment is recorded under its name. Candidates that lose the
    /// tie-break never write.
    pub fn find_child(&self, segment: &str, params: Option<&mut PathParams>) -> Option<&Node<H>> {
        let child = &self.children[self.best_child_index(segment)?];
        if let (Some(name), Some(params)) = (child.param_name(), params) {
            params.insert(name.to_string(), segment.to_string());
        }
        Some(child)
    }

    /// Index of the child a new registration of `segment` descends into.
    ///
    /// A `*` segment joins the existing wildcard child. Any other segment
    /// joins the most specific non-wildcard child matching it, so a
    /// parameter child absorbs both literals and other parameter names.
    pub(crate) fn insertion_child(&self, segment: &str) -> Option<usize> {
        if segment == WILDCARD {
            return self
                .children
                .iter()
                .position(|child| child.kind == NodeKind::Wildcard);
        }
        self.children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.kind != NodeKind::Wildcard && child.matches(segment))
            .max_by_key(|(_, child)| child.kind.specificity())
            .map(|(index, _)| index)
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut Node<H> {
        &mut self.children[index]
    }

    /// Append a fresh chain for `segments` and bind `handler` at its tail.
    ///
    /// No merging happens here. With no segments the handler lands on
    /// `self`. Returns the tail.
    pub fn add_child(&mut self, segments: &[&str], handler: H) -> &mut Node<H> {
        let mut current = self;
        for segment in segments {
            current.children.push(Node::new(segment));
            let tail = current.children.len() - 1;
            current = &mut current.children[tail];
        }
        current.set_handler(handler);
        current
    }

    /// Every registered pattern in this subtree, `/`-joined.
    pub fn routes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_routes(&mut prefix, &mut out);
        out
    }

    fn collect_routes<'a>(&'a self, prefix: &mut Vec<&'a str>, out: &mut Vec<String>) {
        if self.is_terminal() {
            out.push(format!("/{}", prefix.join("/")));
        }
        for child in &self.children {
            prefix.push(&child.pattern);
            child.collect_routes(prefix, out);
            prefix.pop();
        }
    }
}
