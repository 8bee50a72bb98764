//! Convenient re-exports for working with menupath schema types.
//!
//! ## Examples
//!
//! ```
//! use menupath_define::prelude::*;
//!
//! let entry = RawEntry::menu("file", vec![RawEntry::command("exit")]);
//! assert_eq!(entry.children.len(), 1);
//! ```

pub use crate::raw::{DeclaredKind, RawEntry, SchemaDocument};
pub use crate::types::{NodeKind, SchemaForest, SchemaNode};
