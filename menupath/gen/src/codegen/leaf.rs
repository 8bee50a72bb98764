//! Leaf command method generation.
//!
//! Every leaf becomes an async method on its parent's type. The method takes
//! anything convertible into runtime `Arguments` and forwards it, untouched,
//! through `MenuNode::command(..).invoke(..)`.

use menupath_define::SchemaNode;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{EmitContext, doc_attrs};

/// Generates the invocation method for a leaf command.
///
/// ## Examples
///
/// For a leaf with remote name `cad` and arity hint 1:
/// ```ignore
/// // Generated code:
/// /// Import a CAD file.
/// ///
/// /// Takes 1 positional argument.
/// pub async fn cad(
///     &self,
///     args: impl ::core::convert::Into<::menupath_runtime::Arguments>,
/// ) -> ::core::result::Result<::menupath_runtime::Value, ::menupath_runtime::CallError> {
///     self.node.command("cad").invoke(args).await
/// }
/// ```
pub fn generate_leaf_method(node: &SchemaNode, ctx: &EmitContext) -> TokenStream {
    let rt = ctx.runtime();
    let method = format_ident!("{}", node.host_identifier);
    let remote = node.remote_name.as_str();
    let docs = doc_attrs(&leaf_doc(node));

    quote! {
        #docs
        pub async fn #method(
            &self,
            args: impl ::core::convert::Into<#rt::Arguments>,
        ) -> ::core::result::Result<#rt::Value, #rt::CallError> {
            self.node.command(#remote).invoke(args).await
        }
    }
}

fn leaf_doc(node: &SchemaNode) -> String {
    let mut doc = if node.doc.trim().is_empty() {
        format!("Runs the remote `{}` command.", node.remote_name)
    } else {
        node.doc.clone()
    };

    match node.arity {
        Some(1) => doc.push_str("\n\nTakes 1 positional argument."),
        Some(n) => doc.push_str(&format!("\n\nTakes {n} positional arguments.")),
        None => {}
    }
    doc
}
