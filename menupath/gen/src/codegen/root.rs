//! Session root generation.
//!
//! The root is the entry point callers construct from a transport handle.
//! Its path is empty, so every accessor on it starts a fresh path.

use menupath_define::SchemaForest;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{EmitContext, doc_attrs};

/// Generates the root struct, its accessors and all nested modules.
///
/// ## Examples
///
/// For a forest rooted at `Meshing` with a single `file` menu:
/// ```ignore
/// // Generated code:
/// /// Meshing session.
/// #[derive(Debug, Clone)]
/// pub struct Meshing {
///     node: ::menupath_runtime::MenuNode,
/// }
///
/// impl Meshing {
///     pub fn new(transport: ::menupath_runtime::TransportHandle) -> Self { ... }
///     pub fn file(&self) -> file::File { ... }
/// }
///
/// pub mod file { ... }
/// ```
pub fn generate_root(forest: &SchemaForest, ctx: &EmitContext) -> TokenStream {
    let rt = ctx.runtime();
    let ty = format_ident!("{}", forest.root_name);
    let docs = if forest.doc.trim().is_empty() {
        doc_attrs(&format!("Entry point of the `{}` command tree.", forest.root_name))
    } else {
        doc_attrs(&forest.doc)
    };

    let members = ctx.members(&forest.nodes);
    let child_modules = ctx.child_modules(&forest.nodes);

    quote! {
        #docs
        #[derive(Debug, Clone)]
        pub struct #ty {
            node: #rt::MenuNode,
        }

        impl #ty {
            /// Creates the session root over `transport`.
            pub fn new(transport: #rt::TransportHandle) -> Self {
                Self { node: #rt::MenuNode::root(transport) }
            }

            #(#members)*
        }

        impl #rt::Menu for #ty {
            fn node(&self) -> &#rt::MenuNode {
                &self.node
            }
        }

        #(#child_modules)*
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GeneratorOptions;
    use crate::test_utils::{meshing_forest, pretty_items};

    fn render(forest: &SchemaForest) -> String {
        let ctx = EmitContext::new(&GeneratorOptions::default()).unwrap();
        pretty_items(generate_root(forest, &ctx))
    }

    #[test]
    fn root_struct_wraps_session_root() {
        let code = render(&meshing_forest());
        assert!(code.contains("pub struct Meshing {"));
        assert!(code.contains("pub fn new(transport: ::menupath_runtime::TransportHandle) -> Self"));
        assert!(code.contains("::menupath_runtime::MenuNode::root(transport)"));
    }

    #[test]
    fn every_top_level_child_has_a_member() {
        let code = render(&meshing_forest());
        assert!(code.contains("pub fn file(&self) -> file::File"));
        assert!(code.contains("pub fn mesh(&self) -> mesh::Mesh"));
        assert!(code.contains("pub fn controls("));
        assert!(code.contains("pub async fn exit("));
    }

    #[test]
    fn nested_types_mirror_the_tree() {
        let code = render(&meshing_forest());
        for fragment in [
            "pub mod file {",
            "pub mod import_ {",
            "pub mod mesh {",
            "pub mod tet {",
            "pub mod local_regions {",
            "pub struct LocalRegions {",
            "pub mod controls {",
            "pub mod options {",
        ] {
            assert!(code.contains(fragment), "missing {fragment}");
        }
    }

    #[test]
    fn empty_forest_still_has_a_root() {
        let forest = SchemaForest {
            root_name: "Solver".to_string(),
            doc: String::new(),
            nodes: vec![],
        };
        let code = render(&forest);
        assert!(code.contains("pub struct Solver {"));
        assert!(code.contains("Entry point of the `Solver` command tree."));
    }
}
