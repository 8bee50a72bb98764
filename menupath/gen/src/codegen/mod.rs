//! Code generation modules for menupath.
//!
//! This module contains generators that produce Rust source code from a
//! validated [`SchemaForest`](menupath_define::SchemaForest). Each submodule
//! handles one kind of generated item.
//!
//! ## Submodules
//!
//! - [`root`] - The session root struct and its constructor
//! - [`menu`] - One nested module + struct per container or named-object collection
//! - [`leaf`] - One async method per leaf command
//! - [`module_docs`] - Module-level documentation for the generated file
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod leaf;
pub mod menu;
pub mod module_docs;
pub mod root;

use menupath_define::{NodeKind, SchemaNode};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::errors::GeneratorError;
use crate::naming::type_name;
use crate::options::GeneratorOptions;

pub use leaf::generate_leaf_method;
pub use menu::{generate_accessor, generate_menu_module};
pub use module_docs::ModuleDocBuilder;
pub use root::generate_root;

/// Shared state for one emission pass.
#[derive(Debug, Clone)]
pub struct EmitContext {
    runtime: TokenStream,
    external: bool,
}

impl EmitContext {
    /// Builds the context from generator options.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` if the runtime crate path is
    /// not a valid Rust path.
    pub fn new(options: &GeneratorOptions) -> Result<Self, GeneratorError> {
        let path = options.runtime_path()?;
        let relative = path
            .segments
            .first()
            .is_some_and(|s| matches!(s.ident.to_string().as_str(), "crate" | "self" | "super"));
        let runtime = if relative {
            quote! { #path }
        } else {
            quote! { ::#path }
        };
        Ok(Self {
            runtime,
            external: !relative,
        })
    }

    /// Whether the runtime lives in another crate rather than under `crate::`.
    pub fn runtime_is_external(&self) -> bool {
        self.external
    }

    /// Tokens naming the runtime crate, e.g. `::menupath_runtime`.
    pub fn runtime(&self) -> &TokenStream {
        &self.runtime
    }

    /// Members of a generated type: accessors and leaf methods, in schema order.
    pub fn members(&self, children: &[SchemaNode]) -> Vec<TokenStream> {
        children
            .iter()
            .map(|child| match child.kind {
                NodeKind::Leaf => generate_leaf_method(child, self),
                NodeKind::Container | NodeKind::NamedObjectCollection => {
                    generate_accessor(child)
                }
            })
            .collect()
    }

    /// Nested modules for the non-leaf children.
    pub fn child_modules(&self, children: &[SchemaNode]) -> Vec<TokenStream> {
        children
            .iter()
            .filter(|child| !child.kind.is_leaf())
            .map(|child| generate_menu_module(child, self))
            .collect()
    }
}

/// Module and type identifiers for a non-leaf node.
pub(crate) fn node_idents(node: &SchemaNode) -> (proc_macro2::Ident, proc_macro2::Ident) {
    (
        format_ident!("{}", node.host_identifier),
        format_ident!("{}", type_name(&node.host_identifier)),
    )
}

/// One `#[doc]` attribute per line, so multi-line docs render as `///` lines.
pub(crate) fn doc_attrs(text: &str) -> TokenStream {
    let lines = text.lines().map(|line| {
        let line = if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        };
        quote! { #[doc = #line] }
    });
    quote! { #(#lines)* }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefixes_external_crates() {
        let ctx = EmitContext::new(&GeneratorOptions::default()).unwrap();
        assert_eq!(ctx.runtime().to_string(), ":: menupath_runtime");
        assert!(ctx.runtime_is_external());
    }

    #[test]
    fn context_keeps_relative_paths() {
        let options = GeneratorOptions {
            runtime_crate: "crate::runtime".to_string(),
            ..GeneratorOptions::default()
        };
        let ctx = EmitContext::new(&options).unwrap();
        assert_eq!(ctx.runtime().to_string(), "crate :: runtime");
        assert!(!ctx.runtime_is_external());
    }

    #[test]
    fn doc_attrs_emit_one_attribute_per_line() {
        let tokens = doc_attrs("First line.\n\nThird line.").to_string();
        assert_eq!(tokens.matches("doc").count(), 3);
        assert!(tokens.contains("\" First line.\""));
    }

    #[test]
    fn members_follow_schema_order() {
        let ctx = EmitContext::new(&GeneratorOptions::default()).unwrap();
        let children = vec![
            SchemaNode::leaf("exit", "exit"),
            SchemaNode::container("file", "file", vec![SchemaNode::leaf("cad", "cad")]),
        ];
        let members = ctx.members(&children);
        assert_eq!(members.len(), 2);
        assert!(members[0].to_string().contains("fn exit"));
        assert!(members[1].to_string().contains("fn file"));
        assert_eq!(ctx.child_modules(&children).len(), 1);
    }
}
