//! Validation of raw schema entries into a [`SchemaForest`].
//!
//! This is the only place raw input is trusted or rejected. Running it
//! before any emission means a bad schema fails the run with nothing
//! written.
//!
//! ## Validation Checks
//!
//! - **Names**: remote names are non-empty and unique among siblings
//! - **Kinds**: a declared kind must agree with the entry's structure
//! - **Identifiers**: every remote name sanitizes to a legal identifier,
//!   and sibling identifiers are made unique
//!
//! ## Examples
//!
//! ```
//! use menupath_define::{NodeKind, RawEntry, SchemaDocument};
//! use menupath_gen::GeneratorOptions;
//! use menupath_gen::validation::build_forest;
//!
//! let document = SchemaDocument {
//!     root: Some("Meshing".to_string()),
//!     doc: String::new(),
//!     entries: vec![RawEntry::menu(
//!         "file",
//!         vec![RawEntry::menu("import", vec![RawEntry::command("cad")])],
//!     )],
//! };
//!
//! let forest = build_forest(&document, &GeneratorOptions::default()).unwrap();
//! let import = forest.find(&["file", "import"]).unwrap();
//! assert_eq!(import.host_identifier, "import_");
//! assert_eq!(import.kind, NodeKind::Container);
//! ```

use std::collections::HashSet;

use menupath_define::{DeclaredKind, NodeKind, RawEntry, SchemaDocument, SchemaForest, SchemaNode};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::naming::{disambiguate, sanitize_identifier};
use crate::options::GeneratorOptions;

/// Validates a document and produces the tree handed to the emitter.
///
/// ## Errors
///
/// Returns the first problem found; see [`GeneratorError`] for the
/// schema-related variants.
pub fn build_forest(
    document: &SchemaDocument,
    options: &GeneratorOptions,
) -> Result<SchemaForest, GeneratorError> {
    let root_name = options.resolve_root_type(document.root.as_deref())?;
    let nodes = build_level(&document.entries, &[], &options.extra_reserved)?;

    let forest = SchemaForest {
        root_name,
        doc: document.doc.clone(),
        nodes,
    };
    debug!(
        root = %forest.root_name,
        types = forest.type_count(),
        commands = forest.command_count(),
        depth = forest.depth(),
        "schema validated"
    );
    Ok(forest)
}

/// Derives the node kind of an entry.
///
/// Leaf if no children, otherwise container or named-object collection.
/// A declared kind is a hint that must agree.
///
/// ## Errors
///
/// Returns `GeneratorError::ContradictoryKind` when the declaration and the
/// structure disagree.
pub fn determine_kind(entry: &RawEntry, location: &str) -> Result<NodeKind, GeneratorError> {
    let has_children = !entry.children.is_empty();
    let contradiction = |reason: &'static str| GeneratorError::ContradictoryKind {
        location: location.to_string(),
        reason,
    };

    match (entry.kind, entry.named, has_children) {
        (Some(DeclaredKind::Command), _, true) => Err(contradiction("declared command has children")),
        (Some(DeclaredKind::Command), true, false) => {
            Err(contradiction("declared command is marked as a named-object collection"))
        }
        (Some(DeclaredKind::Menu), true, _) => {
            Err(contradiction("declared menu is marked as a named-object collection"))
        }
        (Some(DeclaredKind::Menu), false, false) => Err(contradiction("declared menu has no children")),
        (Some(DeclaredKind::NamedObject), _, false) | (None, true, false) => {
            Err(contradiction("named-object collection has no children"))
        }
        (Some(DeclaredKind::Command), false, false) | (None, false, false) => Ok(NodeKind::Leaf),
        (Some(DeclaredKind::Menu), false, true) | (None, false, true) => Ok(NodeKind::Container),
        (Some(DeclaredKind::NamedObject), _, true) | (None, true, true) => {
            Ok(NodeKind::NamedObjectCollection)
        }
    }
}

fn build_level<'a>(
    entries: &'a [RawEntry],
    parent: &[&'a str],
    extra_reserved: &[String],
) -> Result<Vec<SchemaNode>, GeneratorError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.name.is_empty() {
            return Err(GeneratorError::EmptyName {
                parent: location(parent),
                index,
            });
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(GeneratorError::DuplicateRemoteName {
                parent: location(parent),
                remote_name: entry.name.clone(),
            });
        }
    }

    let bases = entries
        .iter()
        .map(|entry| {
            sanitize_identifier(&entry.name, extra_reserved).ok_or_else(|| {
                GeneratorError::UnsanitizableIdentifier {
                    location: child_location(parent, &entry.name),
                    remote_name: entry.name.clone(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let identifiers = disambiguate(&bases).map_err(|index| GeneratorError::UnresolvableCollision {
        location: child_location(parent, &entries[index].name),
        remote_name: entries[index].name.clone(),
        identifier: bases[index].clone(),
    })?;

    entries
        .iter()
        .zip(identifiers)
        .map(|(entry, host_identifier)| {
            let mut path = parent.to_vec();
            path.push(entry.name.as_str());

            let kind = determine_kind(entry, &location(&path))?;
            let children = build_level(&entry.children, &path, extra_reserved)?;

            Ok(SchemaNode {
                host_identifier,
                remote_name: entry.name.clone(),
                kind,
                children,
                doc: entry.doc.clone(),
                arity: entry.arity,
            })
        })
        .collect()
}

fn location(path: &[&str]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join("/")
    }
}

fn child_location(parent: &[&str], name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", parent.join("/"))
    }
}
