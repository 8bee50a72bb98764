//! Validated schema tree types.
//!
//! These are the build-time counterparts of the runtime proxy nodes:
//!
//! - [`NodeKind`] - Container, leaf command, or named-object collection
//! - [`SchemaNode`] - One validated point in the remote tree
//! - [`SchemaForest`] - The validated tree handed to the code emitter

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Resolved kind of a schema node.
///
/// ## Examples
///
/// ```
/// use menupath_define::NodeKind;
///
/// assert!(NodeKind::Leaf.is_leaf());
/// assert!(NodeKind::NamedObjectCollection.takes_key());
/// assert!(!NodeKind::Container.takes_key());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    /// Submenu with a fixed set of children.
    Container,
    /// Directly invocable remote command.
    Leaf,
    /// Collection whose members are addressed by an instance key.
    NamedObjectCollection,
}

impl NodeKind {
    /// Returns `true` for leaf commands.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Returns `true` if the generated accessor requires an instance key.
    pub fn takes_key(self) -> bool {
        matches!(self, Self::NamedObjectCollection)
    }
}

/// One validated point in the remote command tree.
///
/// `host_identifier` is unique among siblings; `remote_name` is exactly what
/// the remote engine expects and is never altered.
///
/// ## Examples
///
/// ```
/// use menupath_define::{NodeKind, SchemaNode};
///
/// let cad = SchemaNode::leaf("cad", "cad");
/// let import = SchemaNode::container("import_", "import", vec![cad]);
///
/// assert_eq!(import.depth(), 2);
/// assert_eq!(import.leaf_count(), 1);
/// assert_eq!(import.kind, NodeKind::Container);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Sanitized name, usable as a Rust identifier.
    pub host_identifier: String,
    /// Literal remote segment name.
    pub remote_name: String,
    /// Resolved node kind.
    pub kind: NodeKind,
    /// Children in remote order; empty for leaves.
    pub children: Vec<SchemaNode>,
    /// Documentation string, carried verbatim.
    pub doc: String,
    /// Argument-count hint from the schema source.
    pub arity: Option<usize>,
}

impl SchemaNode {
    /// Creates a leaf node with no documentation.
    pub fn leaf(host_identifier: impl Into<String>, remote_name: impl Into<String>) -> Self {
        Self {
            host_identifier: host_identifier.into(),
            remote_name: remote_name.into(),
            kind: NodeKind::Leaf,
            children: Vec::new(),
            doc: String::new(),
            arity: None,
        }
    }

    /// Creates a container node.
    pub fn container(
        host_identifier: impl Into<String>,
        remote_name: impl Into<String>,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self {
            kind: NodeKind::Container,
            children,
            ..Self::leaf(host_identifier, remote_name)
        }
    }

    /// Creates a named-object collection node.
    pub fn collection(
        host_identifier: impl Into<String>,
        remote_name: impl Into<String>,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self {
            kind: NodeKind::NamedObjectCollection,
            children,
            ..Self::leaf(host_identifier, remote_name)
        }
    }

    /// Number of levels from this node down to its deepest descendant,
    /// counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SchemaNode::depth).max().unwrap_or(0)
    }

    /// Number of nodes in this subtree, including this node.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SchemaNode::count).sum::<usize>()
    }

    /// Number of leaf commands in this subtree.
    pub fn leaf_count(&self) -> usize {
        if self.kind.is_leaf() {
            1
        } else {
            self.children.iter().map(SchemaNode::leaf_count).sum()
        }
    }

    /// Looks up a direct child by its remote name.
    pub fn child(&self, remote_name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|c| c.remote_name == remote_name)
    }
}

/// The validated schema tree: a named root holding the top-level nodes.
///
/// The root itself has no remote segment; its children start every path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaForest {
    /// Name of the generated root type (UpperCamelCase).
    pub root_name: String,
    /// Documentation for the root type.
    pub doc: String,
    /// Top-level nodes in remote order.
    pub nodes: Vec<SchemaNode>,
}

impl SchemaForest {
    /// Maximum depth over all top-level nodes.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(SchemaNode::depth).max().unwrap_or(0)
    }

    /// Number of leaf commands in the forest.
    pub fn command_count(&self) -> usize {
        self.nodes.iter().map(SchemaNode::leaf_count).sum()
    }

    /// Number of generated types, the root included.
    pub fn type_count(&self) -> usize {
        1 + self
            .nodes
            .iter()
            .map(|n| n.count() - n.leaf_count())
            .sum::<usize>()
    }

    /// Walks a chain of remote names from the root.
    ///
    /// ## Examples
    ///
    /// ```
    /// use menupath_define::{SchemaForest, SchemaNode};
    ///
    /// let forest = SchemaForest {
    ///     root_name: "Meshing".to_string(),
    ///     doc: String::new(),
    ///     nodes: vec![SchemaNode::container("file", "file", vec![SchemaNode::leaf("exit", "exit")])],
    /// };
    ///
    /// assert!(forest.find(&["file", "exit"]).is_some());
    /// assert!(forest.find(&["file", "missing"]).is_none());
    /// ```
    pub fn find(&self, remote_path: &[&str]) -> Option<&SchemaNode> {
        let (first, rest) = remote_path.split_first()?;
        let mut node = self.nodes.iter().find(|n| n.remote_name == *first)?;
        for name in rest {
            node = node.child(name)?;
        }
        Some(node)
    }
}
