//! Menupath Schema Library
//!
//! This crate provides the types that describe a remote command tree. The
//! descriptions are consumed by the `menupath-gen` binary, which emits a
//! statically navigable type hierarchy on top of `menupath-runtime`.
//!
//! ## Core Types
//!
//! ### Input
//!
//! - [`RawEntry`] - One unvalidated entry as produced by a schema source
//! - [`DeclaredKind`] - Optional kind declaration carried by an entry
//! - [`SchemaDocument`] - A complete dump: root name, doc, and entries
//!
//! ### Validated Tree
//!
//! - [`SchemaNode`] - One validated node with its sanitized identifier
//! - [`NodeKind`] - Container, Leaf, or NamedObjectCollection
//! - [`SchemaForest`] - The root plus its top-level nodes
//!
//! ## Examples
//!
//! ```
//! use menupath_define::{RawEntry, SchemaDocument};
//!
//! let document = SchemaDocument {
//!     root: Some("Meshing".to_string()),
//!     doc: "Meshing session.".to_string(),
//!     entries: vec![RawEntry::menu(
//!         "file",
//!         vec![RawEntry::menu("import", vec![RawEntry::command("cad").with_arity(1)])],
//!     )],
//! };
//!
//! assert_eq!(document.entries[0].children[0].name, "import");
//! ```

pub mod prelude;
pub mod raw;
pub mod types;

pub use raw::{DeclaredKind, RawEntry, SchemaDocument};
pub use types::{NodeKind, SchemaForest, SchemaNode};
