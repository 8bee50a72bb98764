//! Raw schema entries as produced by a schema source.
//!
//! A raw entry is the unvalidated description of one point in the remote
//! command tree. The generator turns a forest of these into a
//! [`SchemaForest`](crate::SchemaForest), deciding node kinds and host
//! identifiers along the way.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Node kind as declared by the schema source.
///
/// The declaration is optional. When present it must agree with the shape
/// of the entry (children or no children), otherwise generation fails.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use menupath_define::DeclaredKind;
///
/// assert_eq!(DeclaredKind::from_str("named-object").unwrap(), DeclaredKind::NamedObject);
/// assert_eq!(DeclaredKind::Command.to_string(), "command");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeclaredKind {
    /// A plain submenu with a fixed set of children.
    Menu,
    /// A directly invocable command.
    Command,
    /// A collection whose members are addressed by a caller-supplied name.
    NamedObject,
}

/// One unvalidated entry of the remote command tree.
///
/// ## Examples
///
/// ```
/// use menupath_define::RawEntry;
///
/// let entry: RawEntry = serde_json::from_str(r#"{
///     "name": "file",
///     "doc": "File operations.",
///     "children": [{ "name": "read-case", "arity": 1 }]
/// }"#).unwrap();
///
/// assert_eq!(entry.name, "file");
/// assert_eq!(entry.children[0].arity, Some(1));
/// assert!(entry.kind.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Literal name the remote engine understands.
    pub name: String,
    /// Declared node kind, if the source carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeclaredKind>,
    /// Documentation string, attached verbatim to the generated item.
    #[serde(default, alias = "help", skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Argument-count hint. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
    /// Marks the entry as a named-object collection when `kind` is absent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub named: bool,
    /// Child entries, in remote order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawEntry>,
}

impl RawEntry {
    /// Creates a leaf command entry.
    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            doc: String::new(),
            arity: None,
            named: false,
            children: Vec::new(),
        }
    }

    /// Creates a submenu entry with the given children.
    pub fn menu(name: impl Into<String>, children: Vec<RawEntry>) -> Self {
        Self {
            children,
            ..Self::command(name)
        }
    }

    /// Creates a named-object collection entry whose members expose `children`.
    pub fn named_object(name: impl Into<String>, children: Vec<RawEntry>) -> Self {
        Self {
            kind: Some(DeclaredKind::NamedObject),
            children,
            ..Self::command(name)
        }
    }

    /// Sets the documentation string.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Sets the argument-count hint.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Sets the declared kind.
    pub fn with_kind(mut self, kind: DeclaredKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRepr {
    Full {
        #[serde(default)]
        root: Option<String>,
        #[serde(default)]
        doc: String,
        entries: Vec<RawEntry>,
    },
    Bare(Vec<RawEntry>),
}

/// A complete schema dump: an optional root name, its doc, and the
/// top-level entries.
///
/// Deserializes either from `{ "root": ..., "doc": ..., "entries": [...] }`
/// or from a bare array of entries.
///
/// ## Examples
///
/// ```
/// use menupath_define::SchemaDocument;
///
/// let bare: SchemaDocument = serde_json::from_str(r#"[{ "name": "exit" }]"#).unwrap();
/// assert!(bare.root.is_none());
/// assert_eq!(bare.entries.len(), 1);
///
/// let full: SchemaDocument =
///     serde_json::from_str(r#"{ "root": "Meshing", "entries": [] }"#).unwrap();
/// assert_eq!(full.root.as_deref(), Some("Meshing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentRepr")]
pub struct SchemaDocument {
    /// Name of the generated root type, if the dump carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Documentation for the root type.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    /// Top-level entries in remote order.
    pub entries: Vec<RawEntry>,
}

impl From<DocumentRepr> for SchemaDocument {
    fn from(repr: DocumentRepr) -> Self {
        match repr {
            DocumentRepr::Full { root, doc, entries } => Self { root, doc, entries },
            DocumentRepr::Bare(entries) => Self {
                root: None,
                doc: String::new(),
                entries,
            },
        }
    }
}
