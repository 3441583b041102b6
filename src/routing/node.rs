//! Trie vertex.
//!
//! A node owns its children directly; no operation needs a parent pointer.
//! Splits replace a node in its parent's child vector instead of rebinding
//! references.

use std::fmt;

/// Segment value of a node that captures one path parameter.
pub const PARAM_MARKER: &str = ":";

/// Path separator. A segment ending in it is a wildcard node.
pub const SEPARATOR: char = '/';

/// Segment of the synthetic top-level route.
pub(crate) const ROOT_SEGMENT: &str = "/";

/// A vertex of the routing trie.
#[derive(Debug, Clone)]
pub struct Node<H> {
    pub(crate) segment: String,
    /// Parameter names of the route ending at this node, in declaration order.
    pub(crate) params: Vec<String>,
    pub(crate) children: Vec<Node<H>>,
    pub(crate) handler: Option<H>,
    /// Set only for direct children of the synthetic root.
    pub(crate) is_root: bool,
}

impl<H> Node<H> {
    pub(crate) fn new(
        segment: impl Into<String>,
        params: Vec<String>,
        handler: Option<H>,
        is_root: bool,
    ) -> Self {
        Self {
            segment: segment.into(),
            params,
            children: Vec::new(),
            handler,
            is_root,
        }
    }

    /// The path fragment this node consumes.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Parameter names bound at this node.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Children in match-try order (once the priority pass has run).
    pub fn children(&self) -> &[Node<H>] {
        &self.children
    }

    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// True when this node captures a parameter.
    pub fn is_param(&self) -> bool {
        self.segment == PARAM_MARKER
    }

    /// True when this node may swallow the rest of a request path.
    pub fn is_wildcard(&self) -> bool {
        self.segment.ends_with(SEPARATOR)
    }

    /// Whether a failed deeper match may fall back to this node as a catch-all.
    ///
    /// A root-level node never does so when it is the bare root segment or
    /// already has children, so that `/` and prefixes of more specific
    /// top-level routes do not swallow unrelated paths.
    pub(crate) fn accepts_wildcard_fallback(&self) -> bool {
        self.is_wildcard()
            && !(self.is_root && (self.segment == ROOT_SEGMENT || !self.children.is_empty()))
    }

    /// Total number of nodes below this one, all depths included.
    pub fn descendants(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendants()).sum()
    }

    fn write_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result
    where
        H: fmt::Debug,
    {
        writeln!(
            f,
            "{}{}  {:?}  {:?}  {}",
            "\t".repeat(level),
            self.segment,
            self.params,
            self.handler,
            self.is_root
        )?;
        for child in &self.children {
            child.write_level(f, level + 1)?;
        }
        Ok(())
    }
}

impl<H: fmt::Debug> fmt::Display for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(segment: &str) -> Node<u8> {
        Node::new(segment, Vec::new(), None, false)
    }

    #[test]
    fn test_kinds() {
        assert!(leaf(":").is_param());
        assert!(!leaf("/:").is_param());
        assert!(leaf("/static/").is_wildcard());
        assert!(!leaf("/static").is_wildcard());
    }

    #[test]
    fn test_descendants_counts_all_depths() {
        let mut grandchild = leaf("c");
        grandchild.children.push(leaf("d"));
        let mut child = leaf("b");
        child.children.push(grandchild);
        let mut node = leaf("a");
        node.children.push(child);
        node.children.push(leaf("e"));

        assert_eq!(node.descendants(), 4);
        assert_eq!(leaf("x").descendants(), 0);
    }

    #[test]
    fn test_wildcard_fallback_rules() {
        // Nested wildcard always qualifies.
        assert!(leaf("files/").accepts_wildcard_fallback());

        // Root-level childless wildcard qualifies.
        let top = Node::<u8>::new("/static/", Vec::new(), Some(1), true);
        assert!(top.accepts_wildcard_fallback());

        // Root segment itself never does.
        let root = Node::<u8>::new("/", Vec::new(), Some(1), true);
        assert!(!root.accepts_wildcard_fallback());

        // Root-level wildcard with children does not.
        let mut parent = Node::<u8>::new("/static/", Vec::new(), Some(1), true);
        parent.children.push(leaf("logo.png"));
        assert!(!parent.accepts_wildcard_fallback());

        // Not a wildcard at all.
        assert!(!leaf("/static").accepts_wildcard_fallback());
    }

    #[test]
    fn test_display_indents_by_depth() {
        let mut node = Node::new("/a", vec!["id".to_string()], Some(7u8), true);
        node.children.push(leaf("b"));
        let out = node.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "/a  [\"id\"]  Some(7)  true");
        assert_eq!(lines[1], "\tb  []  None  false");
    }
}
