//! Container and named-object collection generation.
//!
//! Each non-leaf node becomes a nested `pub mod` named by its host
//! identifier, holding one struct that wraps a runtime `MenuNode`. The
//! parent reaches it through an accessor method; collections take the
//! instance key there.
//!
//! ```text
//! pub mod file {
//!     pub struct File { node: MenuNode }      // parent.child("file")
//!     pub mod import_ {
//!         pub struct Import { node: MenuNode } // parent.child("import")
//!     }
//! }
//! pub mod controls {
//!     pub struct Controls { node: MenuNode }  // parent.named_child("controls", key)
//! }
//! ```

use menupath_define::{NodeKind, SchemaNode};
use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitContext, doc_attrs, node_idents};

/// Generates the accessor a parent type exposes for a non-leaf child.
///
/// Containers get `fn name(&self) -> name::Name`; named-object collections
/// get `fn name(&self, key: impl Into<String>) -> name::Name`.
pub fn generate_accessor(node: &SchemaNode) -> TokenStream {
    let (module, ty) = node_idents(node);
    let docs = doc_attrs(&accessor_doc(node));

    match node.kind {
        NodeKind::NamedObjectCollection => quote! {
            #docs
            pub fn #module(
                &self,
                key: impl ::core::convert::Into<::std::string::String>,
            ) -> #module::#ty {
                #module::#ty::new(&self.node, key)
            }
        },
        NodeKind::Container | NodeKind::Leaf => quote! {
            #docs
            pub fn #module(&self) -> #module::#ty {
                #module::#ty::new(&self.node)
            }
        },
    }
}

/// Generates the nested module for a container or collection, recursing
/// into its children.
pub fn generate_menu_module(node: &SchemaNode, ctx: &EmitContext) -> TokenStream {
    let rt = ctx.runtime();
    let (module, ty) = node_idents(node);
    let remote = node.remote_name.as_str();
    let type_docs = doc_attrs(&type_doc(node));
    let module_doc = format!(" Types under the remote `{}` node.", node.remote_name);

    let constructor = match node.kind {
        NodeKind::NamedObjectCollection => quote! {
            /// Binds one named instance of this collection under `parent`.
            pub fn new(
                parent: &#rt::MenuNode,
                key: impl ::core::convert::Into<::std::string::String>,
            ) -> Self {
                Self { node: parent.named_child(#remote, key) }
            }
        },
        NodeKind::Container | NodeKind::Leaf => quote! {
            /// Binds this menu under `parent`.
            pub fn new(parent: &#rt::MenuNode) -> Self {
                Self { node: parent.child(#remote) }
            }
        },
    };

    let members = ctx.members(&node.children);
    let child_modules = ctx.child_modules(&node.children);

    quote! {
        #[doc = #module_doc]
        pub mod #module {
            #type_docs
            #[derive(Debug, Clone)]
            pub struct #ty {
                node: #rt::MenuNode,
            }

            impl #ty {
                #constructor

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
}

fn accessor_doc(node: &SchemaNode) -> String {
    let first = node.doc.lines().next().unwrap_or_default().trim();
    let summary = if first.is_empty() {
        format!("The remote `{}` menu.", node.remote_name)
    } else {
        first.to_string()
    };
    match node.kind {
        NodeKind::NamedObjectCollection => {
            format!("{summary}\n\nSelects the instance named `key`.")
        }
        NodeKind::Container | NodeKind::Leaf => summary,
    }
}

fn type_doc(node: &SchemaNode) -> String {
    if node.doc.trim().is_empty() {
        match node.kind {
            NodeKind::NamedObjectCollection => {
                format!("One named instance of the remote `{}` collection.", node.remote_name)
            }
            NodeKind::Container | NodeKind::Leaf => {
                format!("The remote `{}` menu.", node.remote_name)
            }
        }
    } else {
        node.doc.clone()
    }
}
