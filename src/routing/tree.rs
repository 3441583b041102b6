//! Prefix-compressed routing trie.
//!
//! # Responsibilities
//! - Merge marker paths into the trie, splitting nodes on partial matches
//! - Order siblings by match priority once registration is over
//! - Resolve request paths, collecting parameter values along the way
//!
//! # Design Decisions
//! - Siblings are scanned linearly; at most one literal sibling shares a
//!   first character with the incoming path
//! - Splits replace the node in its parent's vector (`mem::replace`)
//! - Lookups never mutate and never allocate beyond the value vector

use std::cmp::Reverse;
use std::fmt;
use std::mem;

use crate::routing::node::{Node, SEPARATOR};
use crate::routing::RouteError;

/// Result of a successful trie lookup.
#[derive(Debug)]
pub struct Lookup<'t, 'p, H> {
    /// Node the request path resolved to.
    pub node: &'t Node<H>,
    /// Handler stored at that node.
    pub handler: &'t H,
    /// Captured values in declaration order; a wildcard remainder comes last.
    pub values: Vec<&'p str>,
    /// True when the match came from a wildcard fallback.
    pub wildcard: bool,
}

/// The routing trie. Top-level nodes are the children of a synthetic root.
#[derive(Debug, Clone)]
pub struct Tree<H> {
    roots: Vec<Node<H>>,
}

impl<H> Default for Tree<H> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<H> Tree<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[Node<H>] {
        &self.roots
    }

    /// Number of nodes in the trie.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|n| 1 + n.descendants()).sum()
    }

    /// Insert a marker path.
    ///
    /// `path` must already have every parameter replaced by the marker.
    /// A `None` handler only guarantees the path exists as a node and never
    /// overwrites anything. An empty path is rejected.
    pub fn insert(
        &mut self,
        path: &str,
        params: Vec<String>,
        handler: Option<H>,
    ) -> Result<(), RouteError> {
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        insert_child(&mut self.roots, path, params, handler, true, path)
    }

    /// Sort every sibling list by match priority.
    ///
    /// Must run after the last insertion and before the first lookup.
    pub fn prioritize(&mut self) {
        prioritize(&mut self.roots);
    }

    /// Resolve a request path.
    pub fn find<'t, 'p>(&'t self, path: &'p str) -> Option<Lookup<'t, 'p, H>> {
        let mut values = Vec::new();
        let (node, handler, wildcard) = find_child(&self.roots, path, &mut values)?;
        Some(Lookup {
            node,
            handler,
            values,
            wildcard,
        })
    }
}

impl<H: fmt::Debug> fmt::Display for Tree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.roots {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl<H> Node<H> {
    /// Turn `self` into the child holding everything after `at`.
    fn into_suffix(self, at: usize) -> Node<H> {
        Node {
            segment: self.segment[at..].to_string(),
            params: self.params,
            children: self.children,
            handler: self.handler,
            is_root: false,
        }
    }
}

/// Length in bytes of the common prefix, always on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}

fn insert_child<H>(
    nodes: &mut Vec<Node<H>>,
    path: &str,
    params: Vec<String>,
    handler: Option<H>,
    is_root: bool,
    route: &str,
) -> Result<(), RouteError> {
    for node in nodes.iter_mut() {
        let common = common_prefix_len(&node.segment, path);
        if common == 0 {
            continue;
        }

        if common < node.segment.len().min(path.len()) {
            // Diverges mid-segment: keep the shared prefix, hang both tails off it.
            let prefix = Node::new(&path[..common], Vec::new(), None, node.is_root);
            let old = mem::replace(node, prefix);
            node.children = vec![
                old.into_suffix(common),
                Node::new(&path[common..], params, handler, false),
            ];
            return Ok(());
        }

        if path.len() < node.segment.len() {
            let shorter = Node::new(path, params, handler, node.is_root);
            let old = mem::replace(node, shorter);
            node.children.push(old.into_suffix(path.len()));
        } else if path.len() > node.segment.len() {
            let rest = &path[node.segment.len()..];
            return insert_child(&mut node.children, rest, params, handler, false, route);
        } else {
            let Some(handler) = handler else {
                return Ok(());
            };
            if node.handler.is_some() {
                return Err(RouteError::Duplicate {
                    route: route.to_string(),
                });
            }
            node.params = params;
            node.handler = Some(handler);
        }
        return Ok(());
    }

    nodes.push(Node::new(path, params, handler, is_root));
    Ok(())
}

fn find_child<'t, 'p, H>(
    nodes: &'t [Node<H>],
    path: &'p str,
    values: &mut Vec<&'p str>,
) -> Option<(&'t Node<H>, &'t H, bool)> {
    for node in nodes {
        if node.is_param() {
            let Some(end) = path.find(SEPARATOR) else {
                // Parameter runs to the end of the path.
                let handler = node.handler.as_ref()?;
                values.push(path);
                return Some((node, handler, false));
            };
            let mark = values.len();
            values.push(&path[..end]);
            let found = find_child(&node.children, &path[end..], values);
            if found.is_none() {
                values.truncate(mark);
            }
            return found;
        }

        let Some(rest) = path.strip_prefix(node.segment.as_str()) else {
            continue;
        };

        if rest.is_empty() {
            let handler = node.handler.as_ref()?;
            return Some((node, handler, false));
        }

        let mark = values.len();
        if let Some(found) = find_child(&node.children, rest, values) {
            return Some(found);
        }
        values.truncate(mark);

        if node.accepts_wildcard_fallback() {
            if let Some(handler) = node.handler.as_ref() {
                values.push(rest);
                return Some((node, handler, true));
            }
        }
        // A sibling parameter node may still match.
    }
    None
}

fn prioritize<H>(nodes: &mut [Node<H>]) {
    nodes.sort_by_cached_key(|n| (n.is_param(), Reverse(n.descendants())));
    for node in nodes.iter_mut() {
        prioritize(&mut node.children);
    }
}
